/*!
 * Provider implementations for external translation services.
 *
 * This module contains client implementations for the supported
 * translation backends:
 * - Google: Google Cloud Translation v2 REST API
 * - Mock: deterministic local transform (no network)
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the batch translator.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate a single text from the source to the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate (never empty; callers filter)
    /// * `source_lang` - Source language code
    /// * `target_lang` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// Used by the orchestrator to distinguish a wholly unreachable
    /// backend (batch abort) from a single failed call (per-item degrade).
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Provider identifier for logging and record metadata
    fn name(&self) -> &str;
}

/// Deterministic placeholder used when a single translation call fails
/// or times out. The pipeline never aborts a batch over one item; the
/// degraded value is recognizable and stable across runs.
pub fn fallback_translation(text: &str, target_lang: &str) -> String {
    format!("[{}] {}", target_lang.to_uppercase(), text)
}

pub mod google;
pub mod mock;

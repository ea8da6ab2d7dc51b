/*!
 * Chunked, concurrent batch translation.
 *
 * Input order is the contract: results are assembled by index, never by
 * completion order. A single item failing or timing out degrades that
 * item to a deterministic placeholder instead of failing the batch.
 */

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use tokio::time::timeout;

use crate::errors::ProviderError;
use crate::providers::{TranslationProvider, fallback_translation};

/// Batch translator over a shared provider
pub struct BatchTranslator {
    /// The translation provider to use
    provider: Arc<dyn TranslationProvider>,

    /// Maximum number of items translated concurrently in one chunk
    max_batch_size: usize,

    /// Per-item timeout in seconds
    timeout_secs: u64,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(provider: Arc<dyn TranslationProvider>, max_batch_size: usize, timeout_secs: u64) -> Self {
        Self {
            provider,
            max_batch_size: max_batch_size.max(1),
            timeout_secs,
        }
    }

    /// Check that the backend is reachable before starting a batch
    pub async fn verify_backend(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Provider name, for logs and record metadata
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate a list of texts, preserving length and order
    ///
    /// Texts are processed in contiguous chunks of at most
    /// `max_batch_size`; items within a chunk run concurrently, chunks
    /// run sequentially. An item that errors or exceeds the timeout is
    /// replaced by `[<TARGET>] <text>`.
    pub async fn translate_all(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Vec<String> {
        let total = texts.len();
        let mut results = vec![String::new(); total];
        let per_item_timeout = Duration::from_secs(self.timeout_secs);

        let mut completed = 0;
        for (chunk_index, chunk) in texts.chunks(self.max_batch_size).enumerate() {
            let chunk_offset = chunk_index * self.max_batch_size;
            debug!(
                "Translating chunk {} ({} items, offset {})",
                chunk_index + 1,
                chunk.len(),
                chunk_offset
            );

            let futures = chunk.iter().enumerate().map(|(item_index, text)| {
                let global_index = chunk_offset + item_index;
                let provider = Arc::clone(&self.provider);
                async move {
                    let outcome = timeout(
                        per_item_timeout,
                        provider.translate(text, source_lang, target_lang),
                    )
                    .await;

                    let translated = match outcome {
                        Ok(Ok(translated)) => translated,
                        Ok(Err(e)) => {
                            warn!("Translation failed for item {}: {}", global_index, e);
                            fallback_translation(text, target_lang)
                        }
                        Err(_) => {
                            warn!(
                                "Translation timed out after {}s for item {}",
                                per_item_timeout.as_secs(),
                                global_index
                            );
                            fallback_translation(text, target_lang)
                        }
                    };

                    (global_index, translated)
                }
            });

            for (global_index, translated) in join_all(futures).await {
                results[global_index] = translated;
            }

            completed += chunk.len();
            progress_callback(completed, total);
        }

        results
    }
}

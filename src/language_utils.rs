/*!
 * Language utilities for the closed set of supported language pairs.
 *
 * The pipeline only translates between a fixed set of ISO 639-1 codes.
 * Requests outside the set fail with `AppError::UnsupportedLanguage`
 * before any translation call is made.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

use crate::errors::AppError;

/// The closed set of language codes the pipeline accepts
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ko", "ja", "zh", "es", "fr", "de"];

/// Default source language code
pub const DEFAULT_SOURCE_LANG: &str = "ko";

/// Default target language code
pub const DEFAULT_TARGET_LANG: &str = "en";

/// Check whether a code belongs to the supported set
pub fn is_supported(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.contains(&normalized.as_str())
}

/// Validate a language code against the supported set, returning the
/// normalized (lowercase, trimmed) code
pub fn validate_language(code: &str) -> Result<String, AppError> {
    let normalized = code.trim().to_lowercase();
    if SUPPORTED_LANGUAGES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(AppError::UnsupportedLanguage(code.to_string()))
    }
}

/// Validate a source/target pair in one call
pub fn validate_language_pair(source: &str, target: &str) -> Result<(String, String), AppError> {
    let source = validate_language(source)?;
    let target = validate_language(target)?;
    Ok((source, target))
}

/// Get the English language name for a supported code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

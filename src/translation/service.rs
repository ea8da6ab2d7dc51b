/*!
 * Caller-facing translation service.
 *
 * Wraps the batch translator with the empty-safe contract: blank inputs
 * never reach the provider, yet every input position gets an output item
 * in the original order.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::translation::batch::BatchTranslator;

/// One translated input, positionally matched to its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationItem {
    /// The input text, byte-equal to what the caller supplied
    pub original: String,
    /// The translated text; empty when the input was blank
    pub translated: String,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
}

/// Translation service over a batch translator
pub struct TranslationService {
    translator: BatchTranslator,
}

impl TranslationService {
    /// Create a service over the given batch translator
    pub fn new(translator: BatchTranslator) -> Self {
        Self { translator }
    }

    /// Check that the translation backend is reachable
    pub async fn verify_backend(&self) -> Result<(), ProviderError> {
        self.translator.verify_backend().await
    }

    /// Provider name, for logs and record metadata
    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }

    /// Translate a list of texts, one item per input in input order
    ///
    /// Blank entries (empty or whitespace-only) are filtered out before
    /// the provider is called and come back with an empty translation at
    /// their original positions.
    pub async fn translate_texts(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Vec<TranslationItem> {
        let mut non_blank_indices = Vec::new();
        let mut non_blank_texts = Vec::new();
        for (index, text) in texts.iter().enumerate() {
            if !text.trim().is_empty() {
                non_blank_indices.push(index);
                non_blank_texts.push(text.clone());
            }
        }

        if non_blank_texts.len() < texts.len() {
            debug!(
                "Skipping {} blank entries of {}",
                texts.len() - non_blank_texts.len(),
                texts.len()
            );
        }

        let translated = self
            .translator
            .translate_all(&non_blank_texts, source_lang, target_lang, progress_callback)
            .await;

        let mut items: Vec<TranslationItem> = texts
            .iter()
            .map(|original| TranslationItem {
                original: original.clone(),
                translated: String::new(),
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            })
            .collect();

        for (position, translated_text) in non_blank_indices.into_iter().zip(translated) {
            items[position].translated = translated_text;
        }

        items
    }

    /// Translate back toward the source language (swapped pair)
    pub async fn back_translate(
        &self,
        translated_texts: &[String],
        source_lang: &str,
        target_lang: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Vec<TranslationItem> {
        self.translate_texts(translated_texts, target_lang, source_lang, progress_callback)
            .await
    }
}

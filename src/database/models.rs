/*!
 * Database entity models.
 *
 * These structures map directly to the `translation_dataset` table and
 * provide type-safe access to persisted data.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quality::QualityMetrics;

/// One persisted dataset record, immutable once appended
///
/// Two identical pipeline runs produce distinct records with distinct
/// ids; dedup, if wanted, happens downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// UUID v4 identifier assigned at append time
    pub id: String,
    /// The original input sentence, byte-equal to what was ingested
    pub source_text: String,
    /// Forward translation
    pub translated_text: String,
    /// Translation back toward the source language
    pub back_translated_text: String,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Quality scores and failure label for this round trip
    pub quality: QualityMetrics,
    /// Whether the record has been consumed by training (owned downstream)
    pub is_trained: bool,
    /// Identifier of the model trained on this record, if any
    pub model_version: Option<String>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl DatasetRecord {
    /// Build a new record with a fresh id and the current timestamp
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        back_translated_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        quality: QualityMetrics,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            back_translated_text: back_translated_text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            quality,
            is_trained: false,
            model_version: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

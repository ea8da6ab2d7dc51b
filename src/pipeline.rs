/*!
 * The round-trip quality pipeline.
 *
 * Orchestrates one batch end to end: forward translation, back
 * translation, per-sentence quality scoring, and one appended dataset
 * record per input, in input order.
 *
 * Failure policy: a wholly unreachable backend or a broken embedding
 * backend aborts the batch; a single translation call failing degrades
 * that item only; a single record failing to persist is logged and
 * counted but never blocks its siblings.
 */

use log::{error, info, warn};

use crate::database::{DatasetRecord, DatasetRepository};
use crate::errors::AppError;
use crate::language_utils;
use crate::quality::QualityScorer;
use crate::translation::{TranslationItem, TranslationService};

/// Summary returned by `generate_dataset`
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Number of input sentences processed (including blanks)
    pub total_processed: usize,
    /// Number of records durably appended
    pub saved_count: usize,
    /// The first few records, for display
    pub sample: Vec<DatasetRecord>,
}

/// How many records the summary carries for display
const SAMPLE_SIZE: usize = 5;

/// Result of one pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// One record per input sentence, in input order
    pub records: Vec<DatasetRecord>,
    /// How many of those records were appended successfully
    pub saved_count: usize,
}

/// End-to-end pipeline over a translation service, scorer and store
pub struct Pipeline {
    service: TranslationService,
    scorer: QualityScorer,
    repository: DatasetRepository,
    max_batch_size: usize,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators
    pub fn new(
        service: TranslationService,
        scorer: QualityScorer,
        repository: DatasetRepository,
        max_batch_size: usize,
    ) -> Self {
        Self {
            service,
            scorer,
            repository,
            max_batch_size,
        }
    }

    /// Forward-only translation, bounded by the batch-size ceiling
    ///
    /// Unlike dataset generation, which chunks arbitrarily large inputs,
    /// a direct translation request above the ceiling is rejected before
    /// any provider call.
    pub async fn translate(
        &self,
        sentences: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<TranslationItem>, AppError> {
        let (source_lang, target_lang) =
            language_utils::validate_language_pair(source_lang, target_lang)?;
        Self::require_non_empty(sentences)?;

        if sentences.len() > self.max_batch_size {
            return Err(AppError::BatchTooLarge {
                actual: sentences.len(),
                max: self.max_batch_size,
            });
        }

        self.verify_backend().await?;

        Ok(self
            .service
            .translate_texts(sentences, &source_lang, &target_lang, |_, _| {})
            .await)
    }

    /// Run the full round-trip pipeline over one batch of sentences
    pub async fn run(
        &self,
        sentences: &[String],
        source_lang: &str,
        target_lang: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<PipelineOutcome, AppError> {
        let (source_lang, target_lang) =
            language_utils::validate_language_pair(source_lang, target_lang)?;
        Self::require_non_empty(sentences)?;
        self.verify_backend().await?;

        info!(
            "Pipeline run: {} sentences, {} -> {}, provider {}",
            sentences.len(),
            source_lang,
            target_lang,
            self.service.provider_name()
        );

        // Each sentence takes three steps: forward, back, score
        let total_steps = sentences.len() * 3;

        let forward = self
            .service
            .translate_texts(sentences, &source_lang, &target_lang, |done, _| {
                progress_callback(done, total_steps)
            })
            .await;

        let translated: Vec<String> = forward.iter().map(|item| item.translated.clone()).collect();
        let back = self
            .service
            .back_translate(&translated, &source_lang, &target_lang, |done, _| {
                progress_callback(sentences.len() + done, total_steps)
            })
            .await;

        // Score every index before persisting anything: a broken
        // embedding backend aborts the batch with no records appended
        let mut records = Vec::with_capacity(sentences.len());
        for (index, source_text) in sentences.iter().enumerate() {
            let quality = self
                .scorer
                .score(source_text, &back[index].translated)
                .await?;

            records.push(DatasetRecord::new(
                source_text.clone(),
                forward[index].translated.clone(),
                back[index].translated.clone(),
                source_lang.clone(),
                target_lang.clone(),
                quality,
            ));
            progress_callback(sentences.len() * 2 + index + 1, total_steps);
        }

        let mut saved_count = 0;
        for record in &records {
            match self.repository.append_record(record).await {
                Ok(_) => saved_count += 1,
                Err(e) => {
                    error!("Failed to persist record {}: {}", record.id, e);
                }
            }
        }

        if saved_count < records.len() {
            warn!(
                "Persisted {} of {} records; the rest failed individually",
                saved_count,
                records.len()
            );
        }

        Ok(PipelineOutcome { records, saved_count })
    }

    /// Run the pipeline and fold the outcome into a display summary
    pub async fn generate_dataset(
        &self,
        sentences: &[String],
        source_lang: &str,
        target_lang: &str,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<DatasetSummary, AppError> {
        let outcome = self
            .run(sentences, source_lang, target_lang, progress_callback)
            .await?;

        Ok(DatasetSummary {
            total_processed: outcome.records.len(),
            saved_count: outcome.saved_count,
            sample: outcome.records.iter().take(SAMPLE_SIZE).cloned().collect(),
        })
    }

    async fn verify_backend(&self) -> Result<(), AppError> {
        self.service
            .verify_backend()
            .await
            .map_err(|e| AppError::TranslationBackendUnavailable(e.to_string()))
    }

    fn require_non_empty(sentences: &[String]) -> Result<(), AppError> {
        if sentences.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::EmptyInput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::quality::{EmbeddingComparator, FailureType, HashEmbeddingBackend};
    use crate::translation::BatchTranslator;
    use std::sync::Arc;

    fn pipeline(provider: MockProvider) -> Pipeline {
        let translator = BatchTranslator::new(Arc::new(provider), 100, 30);
        let comparator = Arc::new(EmbeddingComparator::new(Arc::new(
            HashEmbeddingBackend::new(384),
        )));
        Pipeline::new(
            TranslationService::new(translator),
            QualityScorer::new(comparator),
            DatasetRepository::new_in_memory().unwrap(),
            100,
        )
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_shouldProduceOneRecordPerInputInOrder() {
        let pipeline = pipeline(MockProvider::working());
        let input = strings(&["첫 번째", "두 번째", "세 번째"]);

        let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.saved_count, 3);
        for (record, source) in outcome.records.iter().zip(input.iter()) {
            assert_eq!(&record.source_text, source);
            assert_eq!(record.translated_text, format!("[EN] {}", source));
            assert_eq!(record.back_translated_text, format!("[KO] [EN] {}", source));
            assert_eq!(record.source_lang, "ko");
            assert_eq!(record.target_lang, "en");
        }
    }

    #[tokio::test]
    async fn test_run_blankSentence_shouldYieldEmptyTextRecord() {
        let pipeline = pipeline(MockProvider::working());
        let input = strings(&["실제 문장", ""]);

        let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

        assert_eq!(outcome.records.len(), 2);
        let blank = &outcome.records[1];
        assert_eq!(blank.quality.final_score, 0.0);
        assert_eq!(blank.quality.failure_type, Some(FailureType::EmptyText));
        assert_eq!(blank.translated_text, "");
    }

    #[tokio::test]
    async fn test_run_allBlankInput_shouldReturnEmptyInput() {
        let pipeline = pipeline(MockProvider::working());
        let err = pipeline
            .run(&strings(&["", "  "]), "ko", "en", |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
    }

    #[tokio::test]
    async fn test_run_unreachableBackend_shouldAbortWithoutRecords() {
        let pipeline = pipeline(MockProvider::failing());

        let err = pipeline
            .run(&strings(&["문장"]), "ko", "en", |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::TranslationBackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_run_unsupportedLanguage_shouldFailBeforeAnyCall() {
        let provider = MockProvider::working();
        let pipeline = pipeline(provider.clone());

        let err = pipeline
            .run(&strings(&["문장"]), "ko", "xx", |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnsupportedLanguage(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_sameInputTwice_shouldAppendDistinctRecords() {
        let pipeline = pipeline(MockProvider::working());
        let input = strings(&["같은 문장"]);

        let first = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();
        let second = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

        assert_ne!(first.records[0].id, second.records[0].id);
    }

    #[tokio::test]
    async fn test_translate_overCeiling_shouldRejectWithoutCalls() {
        let provider = MockProvider::working();
        let pipeline = pipeline(provider.clone());
        let input: Vec<String> = (0..101).map(|i| format!("s{}", i)).collect();

        let err = pipeline.translate(&input, "ko", "en").await.unwrap_err();

        assert!(matches!(err, AppError::BatchTooLarge { actual: 101, max: 100 }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_shouldReturnForwardItemsOnly() {
        let pipeline = pipeline(MockProvider::working());
        let items = pipeline
            .translate(&strings(&["안녕하세요"]), "ko", "en")
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].translated, "[EN] 안녕하세요");
    }

    #[tokio::test]
    async fn test_generateDataset_shouldCapSampleAtFive() {
        let pipeline = pipeline(MockProvider::working());
        let input: Vec<String> = (0..8).map(|i| format!("문장 {}", i)).collect();

        let summary = pipeline
            .generate_dataset(&input, "ko", "en", |_, _| {})
            .await
            .unwrap();

        assert_eq!(summary.total_processed, 8);
        assert_eq!(summary.saved_count, 8);
        assert_eq!(summary.sample.len(), 5);
        assert_eq!(summary.sample[0].source_text, "문장 0");
    }
}

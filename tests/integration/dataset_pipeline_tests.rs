/*!
 * End-to-end tests for dataset generation: mock providers, hash
 * embeddings and an in-memory store, exercising the whole round trip.
 */

use std::sync::Arc;

use backtrans::errors::AppError;
use backtrans::providers::mock::MockProvider;
use backtrans::quality::FailureType;

use crate::common::{self, EchoProvider};

#[tokio::test]
async fn test_pipeline_largeBatch_shouldChunkAndPreserveOrder() {
    let provider = MockProvider::working();
    let (pipeline, repository) = common::build_pipeline(Arc::new(provider.clone()), 100);
    let input: Vec<String> = (0..250).map(|i| format!("문장 {}", i)).collect();

    let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

    assert_eq!(outcome.records.len(), 250);
    assert_eq!(outcome.saved_count, 250);
    // Forward and back passes each hit the provider once per sentence
    assert_eq!(provider.call_count(), 500);
    assert_eq!(repository.count_records().await.unwrap(), 250);

    for (i, record) in outcome.records.iter().enumerate() {
        assert_eq!(record.source_text, format!("문장 {}", i));
        assert_eq!(record.translated_text, format!("[EN] 문장 {}", i));
    }
}

#[tokio::test]
async fn test_pipeline_echoProvider_shouldScorePerfectRoundTrip() {
    let (pipeline, _) = common::build_pipeline(Arc::new(EchoProvider), 100);
    let input = common::strings(&["There are 5 apples on the table"]);

    let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

    let quality = &outcome.records[0].quality;
    assert_eq!(quality.semantic_score, 1.0);
    assert_eq!(quality.length_score, 1.0);
    assert_eq!(quality.keyword_score, 1.0);
    assert_eq!(quality.final_score, 1.0);
    assert_eq!(quality.failure_type, None);
}

#[tokio::test]
async fn test_pipeline_blankRows_shouldYieldEmptyTextRecordsInPlace() {
    let (pipeline, repository) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let input = common::strings(&["첫 문장", "", "세 번째"]);

    let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(
        outcome.records[1].quality.failure_type,
        Some(FailureType::EmptyText)
    );
    assert_eq!(outcome.records[1].quality.final_score, 0.0);
    // Blank rows are persisted like any other record
    assert_eq!(repository.count_records().await.unwrap(), 3);
}

#[tokio::test]
async fn test_pipeline_intermittentFailures_shouldDegradeNotAbort() {
    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::intermittent(4)), 100);
    let input: Vec<String> = (0..12).map(|i| format!("sentence {}", i)).collect();

    let outcome = pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

    // Every record exists even though some calls failed underneath
    assert_eq!(outcome.records.len(), 12);
    assert_eq!(outcome.saved_count, 12);
    for record in &outcome.records {
        assert!(!record.translated_text.is_empty());
    }
}

#[tokio::test]
async fn test_pipeline_unreachableBackend_shouldPersistNothing() {
    let (pipeline, repository) = common::build_pipeline(Arc::new(MockProvider::failing()), 100);

    let err = pipeline
        .run(&common::strings(&["문장"]), "ko", "en", |_, _| {})
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::TranslationBackendUnavailable(_)));
    assert_eq!(repository.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn test_pipeline_repeatedRuns_shouldAccumulateDistinctRecords() {
    let (pipeline, repository) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let input = common::strings(&["같은 문장"]);

    pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();
    pipeline.run(&input, "ko", "en", |_, _| {}).await.unwrap();

    assert_eq!(repository.count_records().await.unwrap(), 2);

    let records = repository.recent_records(10).await.unwrap();
    assert_ne!(records[0].id, records[1].id);
    assert_eq!(records[0].source_text, records[1].source_text);
}

#[tokio::test]
async fn test_pipeline_progressCallback_shouldReachTotal() {
    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let input: Vec<String> = (0..7).map(|i| format!("s{}", i)).collect();

    let last_seen = std::sync::Mutex::new((0usize, 0usize));
    pipeline
        .run(&input, "ko", "en", |done, total| {
            *last_seen.lock().unwrap() = (done, total);
        })
        .await
        .unwrap();

    let (done, total) = *last_seen.lock().unwrap();
    assert_eq!(done, total);
    assert_eq!(total, 7 * 3);
}

#[tokio::test]
async fn test_generateDataset_summary_shouldMatchRun() {
    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let input: Vec<String> = (0..6).map(|i| format!("문장 {}", i)).collect();

    let summary = pipeline
        .generate_dataset(&input, "ko", "en", |_, _| {})
        .await
        .unwrap();

    assert_eq!(summary.total_processed, 6);
    assert_eq!(summary.saved_count, 6);
    assert_eq!(summary.sample.len(), 5);
}

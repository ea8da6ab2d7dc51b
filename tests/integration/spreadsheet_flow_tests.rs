/*!
 * Tests for the CSV-to-translation flow: column extraction feeding the
 * forward-only translate operation.
 */

use std::sync::Arc;

use backtrans::errors::AppError;
use backtrans::providers::mock::MockProvider;
use backtrans::spreadsheet::{self, ColumnSelector};

use crate::common;

#[tokio::test]
async fn test_csvToTranslate_shouldTranslateExtractedColumn() {
    let dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(
        dir.path(),
        "input.csv",
        "id,sentence\n1,안녕하세요\n2,감사합니다\n",
    )
    .unwrap();

    let sentences =
        spreadsheet::extract_column(&file, &ColumnSelector::Name("sentence".to_string())).unwrap();

    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let items = pipeline.translate(&sentences, "ko", "en").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].original, "안녕하세요");
    assert_eq!(items[0].translated, "[EN] 안녕하세요");
    assert_eq!(items[1].translated, "[EN] 감사합니다");
}

#[tokio::test]
async fn test_csvToTranslate_blankRows_shouldComeBackEmpty() {
    let dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(
        dir.path(),
        "input.csv",
        "id,sentence\n1,first\n2,\n3,third\n",
    )
    .unwrap();

    let sentences =
        spreadsheet::extract_column(&file, &ColumnSelector::Index(1)).unwrap();

    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::working()), 100);
    let items = pipeline.translate(&sentences, "ko", "en").await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[1].translated, "");
}

#[tokio::test]
async fn test_csvToTranslate_overCeiling_shouldRejectUpFront() {
    let dir = common::create_temp_dir().unwrap();
    let rows: String = (0..30).map(|i| format!("row {}\n", i)).collect();
    let file = common::create_test_file(
        dir.path(),
        "input.csv",
        &format!("sentence\n{}", rows),
    )
    .unwrap();

    let sentences = spreadsheet::extract_column(&file, &ColumnSelector::Index(0)).unwrap();
    assert_eq!(sentences.len(), 30);

    // Ceiling below the row count rejects the whole request
    let (pipeline, _) = common::build_pipeline(Arc::new(MockProvider::working()), 20);
    let err = pipeline.translate(&sentences, "ko", "en").await.unwrap_err();
    assert!(matches!(err, AppError::BatchTooLarge { actual: 30, max: 20 }));
}

#[test]
fn test_extractColumn_missingColumn_shouldFailBeforeAnyTranslation() {
    let dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(dir.path(), "input.csv", "id,text\n1,hello\n").unwrap();

    let err = spreadsheet::extract_column(&file, &ColumnSelector::Name("sentence".to_string()))
        .unwrap_err();
    assert!(matches!(err, AppError::ColumnNotFound(_)));
}

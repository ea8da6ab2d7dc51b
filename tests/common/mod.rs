/*!
 * Common test utilities for the backtrans test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use backtrans::database::DatasetRepository;
use backtrans::errors::ProviderError;
use backtrans::pipeline::Pipeline;
use backtrans::providers::TranslationProvider;
use backtrans::quality::{EmbeddingComparator, HashEmbeddingBackend, QualityScorer};
use backtrans::translation::{BatchTranslator, TranslationService};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A provider that echoes the input unchanged in both directions
///
/// With this provider a round trip reproduces the source exactly, so
/// quality scores hit their maxima.
#[derive(Debug, Clone)]
pub struct EchoProvider;

#[async_trait]
impl TranslationProvider for EchoProvider {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Build a pipeline over the given provider, a hash embedding backend
/// and an in-memory store; returns the repository too so tests can
/// inspect what was persisted
pub fn build_pipeline(
    provider: Arc<dyn TranslationProvider>,
    max_batch_size: usize,
) -> (Pipeline, DatasetRepository) {
    let repository = DatasetRepository::new_in_memory().expect("in-memory store");
    let translator = BatchTranslator::new(provider, max_batch_size, 30);
    let comparator = Arc::new(EmbeddingComparator::new(Arc::new(
        HashEmbeddingBackend::new(384),
    )));

    let pipeline = Pipeline::new(
        TranslationService::new(translator),
        QualityScorer::new(comparator),
        repository.clone(),
        max_batch_size,
    );

    (pipeline, repository)
}

/// Turn a slice of string literals into owned strings
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

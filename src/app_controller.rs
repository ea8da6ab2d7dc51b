/*!
 * Application controller wiring configuration to the pipeline.
 *
 * Builds the provider, embedding backend and dataset store the
 * configuration asks for, runs the requested operation, and renders
 * progress and results for the terminal.
 */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::app_config::{Config, EmbeddingBackendKind, TranslationProviderKind};
use crate::database::{DatabaseConnection, DatasetRepository};
use crate::language_utils;
use crate::pipeline::{DatasetSummary, Pipeline};
use crate::providers::TranslationProvider;
use crate::providers::google::GoogleTranslate;
use crate::providers::mock::MockProvider;
use crate::quality::{
    EmbeddingBackend, EmbeddingComparator, HashEmbeddingBackend, QualityScorer,
    RemoteEmbeddingBackend,
};
use crate::spreadsheet::{self, ColumnSelector};
use crate::translation::{BatchTranslator, TranslationService};

/// Main application controller
pub struct Controller {
    /// App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a controller with default configuration (for tests)
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Run the full dataset-generation pipeline over a CSV input file
    pub async fn run_generate(
        &self,
        input_file: &Path,
        column: &ColumnSelector,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<()> {
        let (source, target) = self.resolve_languages(source_lang, target_lang);
        let sentences = spreadsheet::extract_column(input_file, column)?;

        info!(
            "Generating dataset from {} ({} rows), {} -> {}",
            input_file.display(),
            sentences.len(),
            source,
            target
        );

        let pipeline = self.build_pipeline()?;
        let progress = Self::progress_bar((sentences.len() * 3) as u64);

        let summary = {
            let progress = &progress;
            pipeline
                .generate_dataset(&sentences, &source, &target, move |done, _| {
                    progress.set_position(done as u64)
                })
                .await?
        };
        progress.finish_and_clear();

        Self::print_summary(&summary);
        Ok(())
    }

    /// Forward-only translation of a CSV column, printed to stdout
    pub async fn run_translate(
        &self,
        input_file: &Path,
        column: &ColumnSelector,
        source_lang: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<()> {
        let (source, target) = self.resolve_languages(source_lang, target_lang);
        let sentences = spreadsheet::extract_column(input_file, column)?;

        let pipeline = self.build_pipeline()?;
        let items = pipeline.translate(&sentences, &source, &target).await?;

        for item in &items {
            println!("{}\t{}", item.original, item.translated);
        }
        Ok(())
    }

    /// Print the supported language set and configured defaults
    pub fn show_languages(&self) -> Result<()> {
        println!("Supported languages:");
        for code in language_utils::SUPPORTED_LANGUAGES {
            let name = language_utils::get_language_name(code)?;
            println!("  {}  {}", code, name);
        }
        println!(
            "\nDefault pair: {} -> {}",
            self.config.source_language, self.config.target_language
        );
        Ok(())
    }

    /// Print dataset store statistics
    pub fn show_stats(&self) -> Result<()> {
        let repository = self.build_repository()?;
        let stats = repository.stats()?;
        println!("{}", stats);
        Ok(())
    }

    /// Resolve the language pair from CLI overrides and config defaults
    fn resolve_languages(&self, source: Option<&str>, target: Option<&str>) -> (String, String) {
        (
            source.unwrap_or(&self.config.source_language).to_string(),
            target.unwrap_or(&self.config.target_language).to_string(),
        )
    }

    /// Build the pipeline the configuration describes
    fn build_pipeline(&self) -> Result<Pipeline> {
        let provider = self.build_provider();
        let translator = BatchTranslator::new(
            provider,
            self.config.translation.max_batch_size,
            self.config.translation.timeout_secs,
        );

        let backend = self.build_embedding_backend()?;
        let comparator = Arc::new(EmbeddingComparator::new(backend));

        Ok(Pipeline::new(
            TranslationService::new(translator),
            QualityScorer::new(comparator),
            self.build_repository()?,
            self.config.translation.max_batch_size,
        ))
    }

    fn build_provider(&self) -> Arc<dyn TranslationProvider> {
        match self.config.translation.provider {
            TranslationProviderKind::Mock => Arc::new(MockProvider::working()),
            TranslationProviderKind::Google => Arc::new(GoogleTranslate::new(
                self.config.translation.api_key.clone(),
                self.config.translation.endpoint.clone(),
                self.config.translation.timeout_secs,
            )),
        }
    }

    fn build_embedding_backend(&self) -> Result<Arc<dyn EmbeddingBackend>> {
        Ok(match self.config.quality.embedding {
            EmbeddingBackendKind::Hash => {
                Arc::new(HashEmbeddingBackend::new(self.config.quality.embedding_dimension))
            }
            EmbeddingBackendKind::Remote => Arc::new(
                RemoteEmbeddingBackend::new(
                    self.config.quality.embedding_endpoint.clone(),
                    self.config.translation.timeout_secs,
                )
                .context("Failed to initialize the embedding backend")?,
            ),
        })
    }

    fn build_repository(&self) -> Result<DatasetRepository> {
        match &self.config.database.path {
            Some(path) => Ok(DatasetRepository::new(DatabaseConnection::new(path)?)),
            None => DatasetRepository::new_default(),
        }
    }

    fn progress_bar(total: u64) -> ProgressBar {
        let progress = ProgressBar::new(total);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        progress
    }

    fn print_summary(summary: &DatasetSummary) {
        println!("Processed: {}", summary.total_processed);
        println!("Saved:     {}", summary.saved_count);
        if !summary.sample.is_empty() {
            println!("\nSample:");
            for record in &summary.sample {
                let label = record
                    .quality
                    .failure_type
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "ok".to_string());
                println!(
                    "  [{:.4}] ({}) {} => {}",
                    record.quality.final_score, label, record.source_text, record.back_translated_text
                );
            }
        }
    }
}

/*!
 * # backtrans - Quality-Scored Back-Translation Dataset Pipeline
 *
 * A Rust library for building translation training datasets through
 * round-trip quality estimation.
 *
 * ## Features
 *
 * - Extract sentence columns from CSV input files
 * - Forward- and back-translate batches through pluggable providers:
 *   - Google Cloud Translation v2
 *   - Deterministic offline mock
 * - Score round-trip fidelity with a weighted multi-signal quality
 *   function (semantic similarity, length ratio, numeric-token
 *   preservation)
 * - Label low-quality round trips with categorical failure types
 * - Append one scored record per sentence to a SQLite dataset
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `spreadsheet`: CSV column extraction
 * - `translation`: Order-preserving batch translation:
 *   - `translation::batch`: Chunked, concurrent translation with
 *     per-item timeout and degradation
 *   - `translation::service`: The empty-safe caller-facing service
 * - `quality`: Round-trip quality estimation:
 *   - `quality::embedding`: Embedding backends and cosine comparator
 *   - `quality::scorer`: Weighted scoring and failure classification
 * - `pipeline`: End-to-end orchestration
 * - `database`: Append-only SQLite dataset store
 * - `app_controller`: Main application controller
 * - `language_utils`: The closed supported-language set
 * - `providers`: Translation provider clients:
 *   - `providers::google`: Google Cloud Translation v2 client
 *   - `providers::mock`: Deterministic mock provider
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod quality;
pub mod spreadsheet;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{DatasetRecord, DatasetRepository};
pub use errors::{AppError, EmbeddingError, ProviderError};
pub use language_utils::{SUPPORTED_LANGUAGES, get_language_name};
pub use pipeline::{DatasetSummary, Pipeline};
pub use quality::{FailureType, QualityMetrics, QualityScorer};
pub use translation::{TranslationItem, TranslationService};

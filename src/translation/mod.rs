/*!
 * Order-preserving batch translation over a pluggable provider.
 *
 * This module is split into two submodules:
 *
 * - `batch`: chunked, concurrent translation of a list of texts with
 *   per-item timeout and degradation
 * - `service`: the caller-facing service that filters empty inputs and
 *   drives forward and back translation
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::service::{TranslationItem, TranslationService};

// Submodules
pub mod batch;
pub mod service;

/*!
 * Quality estimation for round-trip translations.
 *
 * This module scores how faithfully a back-translation preserves the
 * original sentence:
 * - **Embedding**: cross-lingual sentence-embedding backends and the
 *   cosine-similarity comparator
 * - **Scorer**: the weighted multi-signal quality score and the
 *   categorical failure classification
 */

pub mod embedding;
pub mod scorer;

// Re-export main types
pub use embedding::{EmbeddingBackend, EmbeddingComparator, HashEmbeddingBackend, RemoteEmbeddingBackend};
pub use scorer::{FailureType, QualityMetrics, QualityScorer};

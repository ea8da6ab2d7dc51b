/*!
 * Sentence-embedding backends and the semantic similarity comparator.
 *
 * The comparator wraps a pretrained cross-lingual embedding model behind
 * the `EmbeddingBackend` trait. The model is expensive to initialize, so
 * the comparator is constructed once per process and shared via `Arc`;
 * it is read-only after initialization and safe to use from concurrent
 * scoring calls.
 */

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::EmbeddingError;

/// Backend that turns a sentence into a fixed-dimension embedding vector
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embed a single non-empty text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Identifier of the underlying model, for record metadata
    fn model_id(&self) -> &str;
}

/// Cosine similarity between two vectors of equal dimension
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Semantic similarity comparator over a shared embedding backend
///
/// Loaded once per process; inject the same instance into every scorer
/// rather than constructing per call.
pub struct EmbeddingComparator {
    backend: Arc<dyn EmbeddingBackend>,
}

impl EmbeddingComparator {
    /// Create a comparator over the given backend
    pub fn new(backend: Arc<dyn EmbeddingBackend>) -> Self {
        info!("Embedding comparator initialized with model: {}", backend.model_id());
        Self { backend }
    }

    /// Semantic similarity between two non-empty texts, in [0, 1]
    ///
    /// Cosine similarity can be negative; negative values are clipped
    /// to 0 so downstream weighting stays in range.
    pub async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32, EmbeddingError> {
        let embedding_a = self.backend.embed(text_a).await?;
        let embedding_b = self.backend.embed(text_b).await?;

        if embedding_a.len() != embedding_b.len() {
            return Err(EmbeddingError::InvalidVector(format!(
                "Dimension mismatch: {} vs {}",
                embedding_a.len(),
                embedding_b.len()
            )));
        }

        let score = cosine_similarity(&embedding_a, &embedding_b);
        Ok(score.clamp(0.0, 1.0))
    }

    /// Identifier of the underlying model
    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }
}

/// Deterministic character-trigram feature-hashing backend
///
/// Maps each character trigram of the (lowercased, padded) input into a
/// fixed-dimension count vector. No model file, no network; identical
/// strings always embed identically. Used as the default offline
/// backend and throughout the test suite.
pub struct HashEmbeddingBackend {
    dimension: usize,
}

impl HashEmbeddingBackend {
    /// Create a backend producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        debug!("Using trigram hash embeddings with dimension {}", dimension);
        Self { dimension }
    }

    fn bucket(&self, trigram: &[char]) -> usize {
        let mut hasher = DefaultHasher::new();
        trigram.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }
}

#[async_trait]
impl EmbeddingBackend for HashEmbeddingBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::RequestFailed(
                "Cannot embed an empty text".to_string(),
            ));
        }

        // Pad so one- and two-character inputs still produce a trigram
        let mut chars: Vec<char> = vec![' '];
        chars.extend(text.to_lowercase().chars());
        chars.push(' ');

        let mut vector = vec![0.0f32; self.dimension];
        for window in chars.windows(3) {
            vector[self.bucket(window)] += 1.0;
        }
        if chars.len() < 3 {
            vector[self.bucket(&chars)] += 1.0;
        }

        Ok(vector)
    }

    fn model_id(&self) -> &str {
        "trigram-hash-v1"
    }
}

/// HTTP client for a sentence-embedding server
///
/// Posts `{"text": ...}` and expects `{"embedding": [...]}` back, the
/// protocol of a sentence-transformers model served out of process.
pub struct RemoteEmbeddingBackend {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl RemoteEmbeddingBackend {
    /// Create a client for the given embedding server endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::InitializationFailed(e.to_string()))?;

        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(EmbeddingError::InitializationFailed(
                "Embedding endpoint is empty".to_string(),
            ));
        }

        Ok(Self {
            client,
            endpoint,
            model: "remote-sentence-embedding".to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingBackend for RemoteEmbeddingBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::RequestFailed(format!(
                "Embedding server returned {}",
                status
            )));
        }

        let parsed = response
            .json::<EmbedResponse>()
            .await
            .map_err(|e| EmbeddingError::InvalidVector(e.to_string()))?;

        if parsed.embedding.is_empty() {
            return Err(EmbeddingError::InvalidVector(
                "Embedding server returned an empty vector".to_string(),
            ));
        }

        Ok(parsed.embedding)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

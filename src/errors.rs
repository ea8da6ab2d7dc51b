/*!
 * Error types for the backtrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request exceeded its deadline
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors that can occur in the embedding backend
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Model or backend failed to initialize
    #[error("Embedding backend failed to initialize: {0}")]
    InitializationFailed(String),

    /// A single embedding request failed
    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    /// The backend returned a vector of unexpected shape
    #[error("Invalid embedding vector: {0}")]
    InvalidVector(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested language code is outside the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Request exceeded the configured batch size ceiling
    #[error("Batch too large: {actual} texts exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of texts in the request
        actual: usize,
        /// Configured ceiling
        max: usize,
    },

    /// Selected column does not exist in the input file
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Input file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No non-empty sentences to process
    #[error("Empty input: no non-empty sentences to process")]
    EmptyInput,

    /// Translation backend is wholly unreachable (aborts the batch)
    #[error("Translation backend unavailable: {0}")]
    TranslationBackendUnavailable(String),

    /// A record could not be persisted (per-record, non-fatal)
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the embedding backend
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

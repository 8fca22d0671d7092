//! Unified error type for store operations.

use thiserror::Error;

/// Top-level error for faq-store operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Embedding failures during ingestion.
    #[error("embedding error: {0}")]
    Embedding(#[from] embedder::EmbeddingError),
}

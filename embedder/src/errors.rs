//! Typed error for the embedder crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while turning text into a query vector.
///
/// Every failure keeps its cause; the embedder never substitutes a
/// zero vector for a failed call.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("invalid embedding endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error (includes timeouts).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from the feature-extraction service.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// The model output could not be interpreted as a token tensor.
    #[error("failed to decode feature-extraction output: {0}")]
    Decode(String),

    /// Pooled vector length does not match the configured dimensionality.
    ///
    /// This indicates a model/collection configuration mismatch, not a
    /// transient runtime condition.
    #[error("embedding dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },
}

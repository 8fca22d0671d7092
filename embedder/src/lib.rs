//! Query/ingest embedding for the FAQ pipeline.
//!
//! Turns a text string into one fixed-length vector: a feature-extraction
//! service produces per-token vectors, and [`pooling`] collapses them by
//! mean pooling over the token axis. The same client is used at
//! ingestion and at query time so both sides of the index stay
//! numerically compatible.

mod client;
mod errors;
pub mod pooling;

pub use client::{EmbeddingConfig, FeatureExtractionClient};
pub use errors::EmbeddingError;

use std::{future::Future, pin::Pin};

/// Embedding contract consumed by the store and the orchestrator.
///
/// Implement this to plug in another embedding backend; the boxed
/// future keeps the trait object-safe.
pub trait TextEmbedder: Send + Sync {
    /// Embeds `text` into a vector of the model's hidden size.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbeddingError>> + Send + 'a>>;
}

impl TextEmbedder for FeatureExtractionClient {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbeddingError>> + Send + 'a>> {
        Box::pin(self.embed(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_endpoint() {
        let cfg = EmbeddingConfig {
            endpoint: "ftp://somewhere".into(),
            model: "m".into(),
            dim: None,
            timeout_secs: None,
        };
        assert!(matches!(
            FeatureExtractionClient::new(cfg),
            Err(EmbeddingError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn rejects_empty_endpoint() {
        let cfg = EmbeddingConfig {
            endpoint: "  ".into(),
            model: "m".into(),
            dim: None,
            timeout_secs: None,
        };
        assert!(matches!(
            FeatureExtractionClient::new(cfg),
            Err(EmbeddingError::InvalidEndpoint(_))
        ));
    }
}

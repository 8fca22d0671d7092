//! Store and collection configuration.

use crate::errors::RetrievalError;

/// Distance function used for the vector space.
///
/// Euclid is the default: Qdrant then reports each hit's score as a
/// plain distance (lower = closer), which is what the pipeline
/// surfaces to callers unmodified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Euclidean distance (L2).
    Euclid,
    /// Cosine distance.
    Cosine,
    /// Dot product (for normalized vectors).
    Dot,
}

/// Configuration for FAQ ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct FaqStoreConfig {
    /// Qdrant endpoint, e.g. `http://127.0.0.1:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name; must match between ingestion and query.
    pub collection: String,
    /// Distance function (Euclid by default).
    pub distance: DistanceKind,
}

impl FaqStoreConfig {
    /// Creates a default config for a given endpoint and collection.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Euclid,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RetrievalError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RetrievalError::Config("collection is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let cfg = FaqStoreConfig::new_default("http://127.0.0.1:6334", "faq_embeddings");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.distance, DistanceKind::Euclid);
    }

    #[test]
    fn empty_collection_is_rejected() {
        let cfg = FaqStoreConfig::new_default("http://127.0.0.1:6334", "  ");
        assert!(matches!(cfg.validate(), Err(RetrievalError::Config(_))));
    }
}

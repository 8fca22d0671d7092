//! FAQ corpus store: retrieval + ingestion over Qdrant.
//!
//! This crate owns the vector-store side of the pipeline:
//! - retrieve top-K context for a ready query vector
//! - ingest FAQ entries with the same embedding path used at query time
//!
//! The Qdrant client lives behind [`qdrant_facade`], so application
//! code only sees [`FaqStore`] and plain data types.

mod config;
mod errors;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{DistanceKind, FaqStoreConfig};
pub use errors::RetrievalError;
pub use record::{FaqEntry, RetrievedItem};

use std::{future::Future, pin::Pin};

use embedder::TextEmbedder;
use tracing::trace;

/// Retrieval contract consumed by the orchestrator.
///
/// `search` must preserve the store's ascending-distance order and may
/// return fewer than `top_k` items for a sparse corpus.
pub trait ContextSource: Send + Sync {
    fn search<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedItem>, RetrievalError>> + Send + 'a>>;
}

/// High-level facade wiring configuration and the Qdrant client.
///
/// Initialized once at startup and shared read-only across requests.
pub struct FaqStore {
    client: qdrant_facade::QdrantFacade,
}

impl FaqStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `RetrievalError::Config` or `RetrievalError::Qdrant` if
    /// the client cannot be initialized.
    pub fn new(cfg: FaqStoreConfig) -> Result<Self, RetrievalError> {
        trace!("FaqStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { client })
    }

    /// Nearest-neighbor search for a ready query vector.
    ///
    /// # Errors
    /// Returns `RetrievalError::Qdrant` if the search fails.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<RetrievedItem>, RetrievalError> {
        retrieve::search_context(&self.client, vector, top_k).await
    }

    /// Embeds and upserts FAQ entries into the collection.
    ///
    /// # Errors
    /// Returns embedding, size-mismatch, or Qdrant failures.
    pub async fn ingest(
        &self,
        entries: &[FaqEntry],
        provider: &dyn TextEmbedder,
        dim: usize,
    ) -> Result<usize, RetrievalError> {
        ingest::ingest_entries(&self.client, entries, provider, dim).await
    }
}

impl ContextSource for FaqStore {
    fn search<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RetrievedItem>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(self.search(vector, top_k))
    }
}

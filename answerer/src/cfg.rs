//! Runtime configuration loaded from environment variables.

use embedder::EmbeddingConfig;
use faq_store::{DistanceKind, FaqStoreConfig};
use llm_service::GeneratorConfig;

/// Config bag for the whole pipeline. Every field has a default so a
/// bare environment still yields a runnable local setup.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Feature-extraction service base URL.
    pub embedding_url: String,
    /// Embedding model identifier; must match the ingested corpus.
    pub embedding_model: String,
    /// Pooled vector dimensionality (384 for all-MiniLM-L6-v2).
    pub embedding_dim: usize,

    /// Qdrant endpoint.
    pub qdrant_url: String,
    /// Optional Qdrant API key.
    pub qdrant_api_key: Option<String>,
    /// Collection name shared by ingestion and query.
    pub qdrant_collection: String,

    /// Ollama endpoint.
    pub ollama_url: String,
    /// Ollama generation model.
    pub ollama_model: String,
    /// Whole-request generation timeout, seconds.
    pub ollama_timeout_secs: u64,

    /// Default number of context documents to retrieve.
    pub top_k: u64,
}

impl PipelineConfig {
    /// Builds the config from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            embedding_url: env("EMBEDDING_URL", "http://127.0.0.1:8090"),
            embedding_model: env(
                "EMBEDDING_MODEL",
                "sentence-transformers/all-MiniLM-L6-v2",
            ),
            embedding_dim: parse("EMBEDDING_DIM", 384usize),

            qdrant_url: env("QDRANT_URL", "http://127.0.0.1:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            qdrant_collection: env("QDRANT_COLLECTION", "faq_embeddings"),

            ollama_url: env("OLLAMA_URL", "http://127.0.0.1:11434"),
            ollama_model: env("OLLAMA_MODEL", "llama3:8b-instruct-q4_0"),
            ollama_timeout_secs: parse("OLLAMA_TIMEOUT_SECS", 30u64),

            top_k: parse("RAG_TOP_K", 3u64).max(1),
        }
    }

    /// Embedder config for both ingestion and query paths.
    pub fn embedding_config(&self) -> EmbeddingConfig {
        EmbeddingConfig {
            endpoint: self.embedding_url.clone(),
            model: self.embedding_model.clone(),
            dim: Some(self.embedding_dim),
            timeout_secs: None,
        }
    }

    /// Store config bound to the shared collection name.
    pub fn store_config(&self) -> FaqStoreConfig {
        FaqStoreConfig {
            qdrant_url: self.qdrant_url.clone(),
            qdrant_api_key: self.qdrant_api_key.clone(),
            collection: self.qdrant_collection.clone(),
            distance: DistanceKind::Euclid,
        }
    }

    /// Generator config for the Ollama client.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            endpoint: self.ollama_url.clone(),
            model: self.ollama_model.clone(),
            timeout_secs: Some(self.ollama_timeout_secs),
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

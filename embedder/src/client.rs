//! HTTP client for a hosted feature-extraction model.
//!
//! Speaks the `POST {endpoint}/pipeline/feature-extraction/{model}`
//! convention with a `{"inputs": "..."}` body and receives per-token
//! vectors as nested JSON float arrays. Pooling happens locally in
//! [`crate::pooling`] so that ingestion and query time share one
//! numeric path.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::EmbeddingError;
use crate::pooling::TokenTensor;

/// Configuration for the feature-extraction backend.
#[derive(Clone, Debug)]
pub struct EmbeddingConfig {
    /// Service base URL, e.g. `http://127.0.0.1:8090`.
    pub endpoint: String,
    /// Model identifier, e.g. `sentence-transformers/all-MiniLM-L6-v2`.
    ///
    /// Must be the same model/version used when the corpus was indexed.
    pub model: String,
    /// Expected pooled dimensionality; enforced when set.
    pub dim: Option<usize>,
    /// Request timeout in seconds (default 30).
    pub timeout_secs: Option<u64>,
}

/// Client that embeds text via a feature-extraction service.
///
/// Reuses one HTTP connection pool; safe to share across requests.
pub struct FeatureExtractionClient {
    client: reqwest::Client,
    url: String,
    model: String,
    dim: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ExtractionRequest<'a> {
    inputs: &'a str,
}

impl FeatureExtractionClient {
    /// Creates a new client from the given config.
    ///
    /// # Errors
    /// - [`EmbeddingError::InvalidEndpoint`] if `cfg.endpoint` is empty
    ///   or not http(s)
    /// - [`EmbeddingError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(EmbeddingError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url = format!("{}/pipeline/feature-extraction/{}", base, cfg.model);

        Ok(Self {
            client,
            url,
            model: cfg.model,
            dim: cfg.dim,
        })
    }

    /// Embeds `text` into a single pooled vector.
    ///
    /// # Errors
    /// - [`EmbeddingError::HttpStatus`] for non-2xx responses
    /// - [`EmbeddingError::Transport`] for client/timeout errors
    /// - [`EmbeddingError::Decode`] if the output is not a token tensor
    /// - [`EmbeddingError::DimensionMismatch`] if the pooled length
    ///   differs from the configured dimensionality
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!("POST {}", self.url);
        let resp = self
            .client
            .post(&self.url)
            .json(&ExtractionRequest { inputs: text })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(EmbeddingError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| EmbeddingError::Decode(format!("invalid JSON body: {e}")))?;

        let vector = TokenTensor::from_json(&raw)?.mean_pool()?;

        if let Some(want) = self.dim {
            if vector.len() != want {
                return Err(EmbeddingError::DimensionMismatch {
                    got: vector.len(),
                    want,
                });
            }
        }

        Ok(vector)
    }
}

//! Streaming Ollama client for text generation.
//!
//! Implements `POST {endpoint}/api/generate` with `stream: true`: the
//! body arrives as newline-delimited JSON fragments which are folded
//! into one answer string by [`crate::stream::FragmentAccumulator`].
//! One attempt per call; retry policy, if any, belongs to the caller.

use std::time::Duration;

use futures::StreamExt;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::stream::FragmentAccumulator;

/// Errors produced by [`OllamaGenerator`].
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error, including the request timeout
    /// firing mid-stream.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },
}

/// Configuration for the generation backend.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Ollama base URL, e.g. `http://127.0.0.1:11434`.
    pub endpoint: String,
    /// Model identifier, e.g. `llama3:8b-instruct-q4_0`.
    pub model: String,
    /// Whole-request timeout in seconds, covering the streamed body
    /// read (default 30).
    pub timeout_secs: Option<u64>,
}

/// Thin streaming client for Ollama generation.
///
/// Reuses an HTTP client with a configurable timeout; safe to share
/// across requests.
pub struct OllamaGenerator {
    client: reqwest::Client,
    model: String,
    url_generate: String,
}

/// Request body for `/api/generate` (streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

impl OllamaGenerator {
    /// Creates a new generator client from the given config.
    ///
    /// # Errors
    /// - [`GenerationError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`GenerationError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: GeneratorConfig) -> Result<Self, GenerationError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(GenerationError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);

        Ok(Self {
            client,
            model: cfg.model,
            url_generate,
        })
    }

    /// Streams a completion for `prompt` and returns the accumulated
    /// answer.
    ///
    /// The body is consumed as a finite, single-pass byte stream;
    /// malformed NDJSON lines are skipped, everything else is
    /// concatenated in arrival order and trimmed.
    ///
    /// # Errors
    /// - [`GenerationError::HttpStatus`] for non-2xx responses
    /// - [`GenerationError::Transport`] for connection failures or the
    ///   timeout firing before end-of-stream
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: true,
        };

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GenerationError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let mut acc = FragmentAccumulator::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            acc.push_chunk(&chunk?);
        }

        Ok(acc.finish())
    }
}

//! Streaming completion client for a local LLM service.
//!
//! One backend is implemented: Ollama's `/api/generate` NDJSON stream
//! (see [`ollama`]). The [`TextGenerator`] trait is the seam the
//! orchestrator depends on.

pub mod ollama;
mod stream;

pub use ollama::{GenerationError, GeneratorConfig, OllamaGenerator};

use std::{future::Future, pin::Pin};

/// Generation contract consumed by the orchestrator.
pub trait TextGenerator: Send + Sync {
    /// Produces the full answer for `prompt`, accumulated from the
    /// backend's streamed fragments.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

impl TextGenerator for OllamaGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(self.generate(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoint() {
        let cfg = GeneratorConfig {
            endpoint: "localhost:11434".into(),
            model: "llama3:8b-instruct-q4_0".into(),
            timeout_secs: None,
        };
        assert!(matches!(
            OllamaGenerator::new(cfg),
            Err(GenerationError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_transport_error() {
        // Reserved TEST-NET-1 address; connection fails fast with the
        // short timeout.
        let cfg = GeneratorConfig {
            endpoint: "http://192.0.2.1:11434".into(),
            model: "llama3:8b-instruct-q4_0".into(),
            timeout_secs: Some(1),
        };
        let client = OllamaGenerator::new(cfg).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}

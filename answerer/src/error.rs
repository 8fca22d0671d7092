//! Pipeline error: one variant per stage, cause preserved.

use thiserror::Error;

use embedder::EmbeddingError;
use faq_store::RetrievalError;
use llm_service::GenerationError;

/// First failure of the embed → retrieve → generate pipeline.
///
/// The variant names the stage that failed; the wrapped error carries
/// the underlying cause. No stage recovers from another stage's
/// failure.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("embed stage failed: {0}")]
    Embed(#[from] EmbeddingError),

    #[error("retrieve stage failed: {0}")]
    Retrieve(#[from] RetrievalError),

    #[error("generate stage failed: {0}")]
    Generate(#[from] GenerationError),
}

impl AskError {
    /// Stable stage label for logs and API payloads.
    pub fn stage(&self) -> &'static str {
        match self {
            AskError::Embed(_) => "embed",
            AskError::Retrieve(_) => "retrieve",
            AskError::Generate(_) => "generate",
        }
    }
}

use answerer::{Answerer, AskError, PipelineConfig};

/// Shared state for all HTTP handlers.
///
/// Built once at startup; the pipeline's clients are read-only from
/// the request path.
pub struct AppState {
    /// The question-answering pipeline.
    pub answerer: Answerer,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AskError> {
        let cfg = PipelineConfig::from_env();
        let answerer = Answerer::from_config(&cfg)?;
        Ok(Self { answerer })
    }
}

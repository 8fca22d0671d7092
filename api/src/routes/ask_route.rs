//! POST /ask — answers a question from the FAQ corpus.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app_state::AppState;

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question.
    pub question: String,
    /// Optional override for the number of retrieved documents.
    #[serde(default)]
    pub top_k: Option<u64>,
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final model answer (plain text).
    pub answer: String,
    /// The context the answer was grounded on, closest first.
    pub retrieved: Vec<RetrievedDto>,
}

/// One retrieved document with its distance.
#[derive(Debug, Serialize)]
pub struct RetrievedDto {
    pub document: String,
    pub distance: f32,
}

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"When are you open?","top_k":3}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let qa = state
        .answerer
        .ask(&body.question, body.top_k)
        .await
        .map_err(|e| {
            error!("ask pipeline failed at {} stage: {e}", e.stage());
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    let retrieved = qa
        .retrieved
        .into_iter()
        .map(|item| RetrievedDto {
            document: item.document,
            distance: item.distance,
        })
        .collect();

    Ok(Json(AskResponse {
        answer: qa.answer,
        retrieved,
    }))
}

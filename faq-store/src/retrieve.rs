//! Mapping of raw search hits into retrieval results.

use crate::errors::RetrievalError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::RetrievedItem;

use tracing::{trace, warn};

/// Searches the collection and maps hits to [`RetrievedItem`]s.
///
/// The store's order is preserved as returned (ascending distance for
/// a Euclid collection); no re-ranking happens here. Fewer than
/// `top_k` hits is not an error.
///
/// # Errors
/// Returns `RetrievalError::Qdrant` on client failures.
pub async fn search_context(
    client: &QdrantFacade,
    vector: Vec<f32>,
    top_k: u64,
) -> Result<Vec<RetrievedItem>, RetrievalError> {
    trace!("retrieve::search_context top_k={top_k}");

    let hits = client.search(vector, top_k).await?;
    Ok(map_hits(hits))
}

/// Converts `(score, payload)` tuples into retrieval items, keeping
/// the input order.
pub(crate) fn map_hits(hits: Vec<(f32, serde_json::Value)>) -> Vec<RetrievedItem> {
    let mut out = Vec::with_capacity(hits.len());
    for (distance, payload) in hits {
        let document = match payload.get("text").and_then(|v| v.as_str()) {
            Some(text) => text.to_string(),
            None => {
                warn!("hit at distance {distance} has no 'text' payload: {payload}");
                String::new()
            }
        };
        out.push(RetrievedItem { document, distance });
    }
    out
}

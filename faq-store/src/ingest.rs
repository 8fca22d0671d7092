//! Corpus ingestion: embed FAQ documents and upsert them into Qdrant.
//!
//! Query-time retrieval only works if this path and the query path use
//! the same embedding model and the same collection, so ingestion
//! takes the same [`TextEmbedder`] the pipeline uses for questions.

use std::collections::HashMap;

use qdrant_client::Payload;
use qdrant_client::qdrant::{PointStruct, Value as QValue, value};
use tracing::{debug, info};

use embedder::TextEmbedder;

use crate::errors::RetrievalError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::FaqEntry;

/// Embeds each entry's question and upserts one point per FAQ.
///
/// Point ids are the zero-based entry indices; the stored payload
/// carries the full document text (question + answer).
///
/// # Errors
/// Returns embedding failures, vector size mismatches against `dim`,
/// or Qdrant failures.
pub async fn ingest_entries(
    client: &QdrantFacade,
    entries: &[FaqEntry],
    provider: &dyn TextEmbedder,
    dim: usize,
) -> Result<usize, RetrievalError> {
    if entries.is_empty() {
        debug!("no FAQ entries to ingest");
        return Ok(0);
    }

    client.ensure_collection(dim).await?;

    let mut points = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let vector = provider.embed(&entry.question).await?;
        if vector.len() != dim {
            return Err(RetrievalError::VectorSizeMismatch {
                got: vector.len(),
                want: dim,
            });
        }

        let mut payload: HashMap<String, QValue> = HashMap::new();
        payload.insert("text".into(), qstring(&entry.document()));

        points.push(PointStruct::new(
            idx as u64,
            vector,
            Payload::from(payload),
        ));
        debug!("embedded FAQ {}: {}", idx + 1, entry.question);
    }

    let count = client.upsert_points(points).await?;
    info!("ingested {count} FAQ entries");
    Ok(count)
}

/// Wraps a string into a Qdrant `Value`.
fn qstring(s: &str) -> QValue {
    QValue {
        kind: Some(value::Kind::StringValue(s.to_string())),
    }
}

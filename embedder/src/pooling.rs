//! Mean pooling over per-token embeddings.
//!
//! A feature-extraction model emits one vector per token; the store
//! holds exactly one vector per document, so the token axis must be
//! collapsed before anything touches Qdrant. The collapse rule depends
//! on the rank of the model output and must match what ran when the
//! corpus was indexed, or retrieval quality degrades silently. Hence
//! the explicit shape descriptor: the numeric contract stays auditable
//! in one place.

use crate::errors::EmbeddingError;

/// Model output parsed into an explicit shape descriptor.
///
/// - `Rank3`: `[batch, seq_len, hidden]` — the usual pipeline output,
///   batch must be 1.
/// - `Rank2`: `[seq_len, hidden]` — unbatched output.
/// - `Rank1`: `[hidden]` — already pooled upstream.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenTensor {
    Rank3(Vec<Vec<Vec<f32>>>),
    Rank2(Vec<Vec<f32>>),
    Rank1(Vec<f32>),
}

impl TokenTensor {
    /// Parses nested JSON float arrays into a shape descriptor.
    ///
    /// Singleton wrappers deeper than rank 3 are unwrapped first, so a
    /// `[1, 1, seq, hidden]` payload still classifies as `Rank3`.
    ///
    /// # Errors
    /// Returns [`EmbeddingError::Decode`] for empty, ragged,
    /// non-numeric, or deeper-than-singleton rank-4+ payloads.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, EmbeddingError> {
        let mut value = value;
        // Unwrap extra singleton nesting down to rank <= 3.
        while rank_of(value) > 3 {
            match value.as_array() {
                Some(arr) if arr.len() == 1 => value = &arr[0],
                _ => {
                    return Err(EmbeddingError::Decode(format!(
                        "unsupported tensor rank {}",
                        rank_of(value)
                    )));
                }
            }
        }

        match rank_of(value) {
            3 => {
                let batch = value
                    .as_array()
                    .ok_or_else(|| EmbeddingError::Decode("expected array".into()))?
                    .iter()
                    .map(parse_matrix)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TokenTensor::Rank3(batch))
            }
            2 => Ok(TokenTensor::Rank2(parse_matrix(value)?)),
            1 => Ok(TokenTensor::Rank1(parse_row(value)?)),
            r => Err(EmbeddingError::Decode(format!(
                "unsupported tensor rank {r}"
            ))),
        }
    }

    /// Collapses the token axis into a single vector.
    ///
    /// - `[1, seq, hidden]` → mean over `seq`, then drop the batch axis.
    /// - `[seq, hidden]` with `seq > 1` → mean over the first axis.
    /// - `[1, hidden]` → drop the row axis without averaging.
    /// - `[hidden]` → returned as-is.
    ///
    /// # Errors
    /// Returns [`EmbeddingError::Decode`] for an empty sequence, a
    /// ragged hidden axis, or a batch axis larger than one.
    pub fn mean_pool(self) -> Result<Vec<f32>, EmbeddingError> {
        let pooled = match self {
            TokenTensor::Rank3(batch) => match batch.len() {
                1 => {
                    let rows = batch.into_iter().next().unwrap_or_default();
                    mean_rows(&rows)?
                }
                n => {
                    return Err(EmbeddingError::Decode(format!(
                        "expected batch of size 1, got {n}"
                    )));
                }
            },
            TokenTensor::Rank2(rows) => {
                if rows.len() == 1 {
                    // Single token row: squeeze, do not average.
                    rows.into_iter().next().unwrap_or_default()
                } else {
                    mean_rows(&rows)?
                }
            }
            TokenTensor::Rank1(v) => v,
        };

        if pooled.is_empty() {
            return Err(EmbeddingError::Decode("empty embedding".into()));
        }
        Ok(pooled)
    }
}

/// Element-wise mean across rows.
fn mean_rows(rows: &[Vec<f32>]) -> Result<Vec<f32>, EmbeddingError> {
    let Some(first) = rows.first() else {
        return Err(EmbeddingError::Decode("empty token sequence".into()));
    };
    let hidden = first.len();

    let mut acc = vec![0.0f64; hidden];
    for row in rows {
        if row.len() != hidden {
            return Err(EmbeddingError::Decode(format!(
                "ragged hidden axis: {} vs {}",
                row.len(),
                hidden
            )));
        }
        for (a, x) in acc.iter_mut().zip(row) {
            *a += f64::from(*x);
        }
    }

    let n = rows.len() as f64;
    Ok(acc.into_iter().map(|a| (a / n) as f32).collect())
}

fn rank_of(value: &serde_json::Value) -> usize {
    let mut rank = 0;
    let mut cur = value;
    while let Some(arr) = cur.as_array() {
        rank += 1;
        match arr.first() {
            Some(inner) => cur = inner,
            None => break,
        }
    }
    rank
}

fn parse_matrix(value: &serde_json::Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    value
        .as_array()
        .ok_or_else(|| EmbeddingError::Decode("expected array of rows".into()))?
        .iter()
        .map(parse_row)
        .collect()
}

fn parse_row(value: &serde_json::Value) -> Result<Vec<f32>, EmbeddingError> {
    value
        .as_array()
        .ok_or_else(|| EmbeddingError::Decode("expected array of numbers".into()))?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| EmbeddingError::Decode(format!("non-numeric element: {v}")))
        })
        .collect()
}

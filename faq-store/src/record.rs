//! Data models for the FAQ corpus and retrieval results.

use serde::{Deserialize, Serialize};

/// One FAQ as it appears in the source file (`faqs.json`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    /// The document text stored alongside the vector: question and
    /// answer concatenated, as indexed by the original corpus.
    pub fn document(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }
}

/// A single retrieval hit, in the store's ascending-distance order.
#[derive(Clone, Debug, Serialize)]
pub struct RetrievedItem {
    /// Stored document text.
    pub document: String,
    /// Dissimilarity score from the store's metric; lower = closer.
    pub distance: f32,
}

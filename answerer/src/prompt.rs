//! Prompt builder: fixed instruction + labeled context and question.
//!
//! Pure and deterministic so it can be tested in isolation. No
//! truncation happens here; if the assembled prompt exceeds the
//! model's context window, the generation call is where that surfaces.

/// System instruction. Keep it short; it steers better that way.
const SYSTEM_INSTRUCTION: &str = "\
You are a helpful, accurate banking FAQ assistant.
Use ONLY the context below to answer the user's question.
If the answer is not present, say \"I don't know. Please contact the bank.\"";

/// Substituted for the context block when retrieval found nothing.
pub const NO_CONTEXT_SENTINEL: &str = "No relevant context found.";

/// Renders the final prompt from the question and retrieved documents.
///
/// Documents are joined with a blank line in the order received; the
/// question is included verbatim.
pub fn assemble(question: &str, documents: &[&str]) -> String {
    let context = if documents.is_empty() {
        NO_CONTEXT_SENTINEL.to_string()
    } else {
        documents.join("\n\n")
    };

    format!(
        "{SYSTEM_INSTRUCTION}\n\nCONTEXT:\n{context}\n\nUSER QUESTION:\n{question}\n\nAnswer concisely:"
    )
}

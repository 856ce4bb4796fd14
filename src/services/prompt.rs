use crate::domain::{Passage, PromptRequest};

/// Combine rendered history, retrieved passages, and the question into a
/// single generation request. Passage texts are joined with blank-line
/// separators in retrieval order; the question passes through unmodified.
pub fn assemble(history: String, passages: &[Passage], question: &str) -> PromptRequest {
    let context = passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    PromptRequest::new(history, context, question)
}

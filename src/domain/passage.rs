use serde::{Deserialize, Serialize};

/// A contiguous, possibly overlapping slice of transcript text used as a
/// retrieval unit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    /// Position of this passage in the original transcript order.
    pub source_order: usize,
}

impl Passage {
    pub fn new(text: impl Into<String>, source_order: usize) -> Self {
        Self {
            text: text.into(),
            source_order,
        }
    }
}

/// A retrieved passage with its distance to the query. Lower distance
/// means more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub passage: Passage,
    pub distance: f32,
}

use serde::{Deserialize, Serialize};

/// One question/answer exchange. The caller owns the ordered turn
/// sequence and appends to it after each successful answer; turns are
/// never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

impl Turn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

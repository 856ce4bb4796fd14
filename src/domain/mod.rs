pub mod passage;
pub mod prompt;
pub mod turn;

pub use passage::{Passage, ScoredPassage};
pub use prompt::PromptRequest;
pub use turn::Turn;

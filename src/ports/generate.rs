use async_trait::async_trait;

use crate::error::Result;

/// Text-generation backend. One request per call; retry policy lives
/// with the caller, not the backend.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Send a single prompt and return the backend's response text with
    /// leading/trailing whitespace trimmed.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

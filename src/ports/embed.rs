use async_trait::async_trait;

use crate::error::Result;

/// Embeds text into fixed-dimension vectors. Implementations must be
/// deterministic for a fixed model: identical input always yields the
/// identical vector. Passages and queries must go through the same
/// embedder instance so they share one embedding space.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
    fn dimension(&self) -> usize;
    fn model_name(&self) -> &str;
}

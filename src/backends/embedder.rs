use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{Result, VidchatError};
use crate::ports::TextEmbedder;

const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DIMENSION: usize = 384;

/// Local embedding backend over fastembed's AllMiniLML6V2.
///
/// `TextEmbedding::embed` takes `&mut self` and is CPU-bound, so the
/// model sits behind a `Mutex` and every call runs on the blocking
/// thread pool. The model is deterministic: identical input always
/// produces the identical vector.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Initialize the embedding model. Downloads the model files on
    /// first use, so this belongs at process startup, not per request.
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .map_err(|e| VidchatError::EmbeddingBackend(e.to_string()))?;

        tracing::info!(model = MODEL_NAME, dimension = DIMENSION, "embedder ready");
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl TextEmbedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])
            .await?
            .pop()
            .ok_or_else(|| VidchatError::EmbeddingBackend("empty embedding batch".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let model = Arc::clone(&self.model);
        let owned: Vec<String> = texts.iter().map(ToString::to_string).collect();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| VidchatError::EmbeddingBackend("embedder mutex poisoned".to_string()))?;
            model
                .embed(owned, None)
                .map_err(|e| VidchatError::EmbeddingBackend(e.to_string()))
        })
        .await
        .map_err(|e| VidchatError::EmbeddingBackend(format!("embedding task failed: {e}")))?
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}

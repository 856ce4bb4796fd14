//! Deterministic in-process doubles for the embedding and generation
//! ports, so pipeline behavior is testable without network or model
//! downloads.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, VidchatError};
use crate::ports::{AnswerBackend, TextEmbedder};

const MOCK_DIMENSION: usize = 64;

/// Deterministic bag-of-words embedder: each word hashes into one of 64
/// buckets. Texts sharing words land near each other, which is enough
/// signal for retrieval ordering in tests.
pub(crate) struct MockEmbedder;

fn bag_of_words(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0; MOCK_DIMENSION];
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut hasher = DefaultHasher::new();
        word.to_lowercase().hash(&mut hasher);
        let bucket = (hasher.finish() % MOCK_DIMENSION as u64) as usize;
        vector[bucket] += 1.0;
    }
    vector
}

#[async_trait]
impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(bag_of_words(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| bag_of_words(t)).collect())
    }

    fn dimension(&self) -> usize {
        MOCK_DIMENSION
    }

    fn model_name(&self) -> &str {
        "mock-bag-of-words"
    }
}

/// Embedder that always fails, for exercising indexing failure paths.
pub(crate) struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(VidchatError::EmbeddingBackend("mock failure".to_string()))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Err(VidchatError::EmbeddingBackend("mock failure".to_string()))
    }

    fn dimension(&self) -> usize {
        MOCK_DIMENSION
    }

    fn model_name(&self) -> &str {
        "mock-failing"
    }
}

/// Embedder that hangs far longer than any test timeout, for exercising
/// the embedding timeout seam.
pub(crate) struct SlowEmbedder;

#[async_trait]
impl TextEmbedder for SlowEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![0.0; MOCK_DIMENSION])
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(texts.iter().map(|_| vec![0.0; MOCK_DIMENSION]).collect())
    }

    fn dimension(&self) -> usize {
        MOCK_DIMENSION
    }

    fn model_name(&self) -> &str {
        "mock-slow"
    }
}

/// Backend that never answers before the generation timeout expires.
pub(crate) struct SlowBackend;

#[async_trait]
impl AnswerBackend for SlowBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("too late".to_string())
    }
}

/// Scripted generation backend: returns a fixed reply and records every
/// prompt it receives.
pub(crate) struct StubBackend {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubBackend {
    pub(crate) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().expect("prompt log poisoned").last().cloned()
    }
}

#[async_trait]
impl AnswerBackend for StubBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Backend that fails with a transient timeout a fixed number of times
/// before succeeding, for retry-seam tests.
pub(crate) struct FlakyBackend {
    remaining_failures: AtomicU32,
    reply: String,
}

impl FlakyBackend {
    pub(crate) fn new(failures: u32, reply: impl Into<String>) -> Self {
        Self {
            remaining_failures: AtomicU32::new(failures),
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl AnswerBackend for FlakyBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1))
            .is_ok();
        if failed {
            return Err(VidchatError::GenerationTimeout(1));
        }
        Ok(self.reply.clone())
    }
}

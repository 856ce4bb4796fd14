use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::{Passage, ScoredPassage};
use crate::error::{Result, VidchatError};
use crate::ports::TextEmbedder;

/// A fully built, immutable view of the index. Queries hold one snapshot
/// for their whole lifetime, so a concurrent rebuild can never expose a
/// partially built state.
struct IndexSnapshot {
    passages: Vec<Passage>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

/// In-memory nearest-neighbor index over transcript passages.
///
/// Built once per transcript session and replaced wholesale on rebuild;
/// there is no incremental update. Passages and queries are embedded by
/// the same injected embedder so distances are always computed within a
/// single embedding space.
pub struct SemanticIndex<E: TextEmbedder> {
    embedder: Arc<E>,
    timeout: Option<Duration>,
    inner: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl<E: TextEmbedder> SemanticIndex<E> {
    pub fn new(embedder: Arc<E>, timeout: Option<Duration>) -> Self {
        Self {
            embedder,
            timeout,
            inner: RwLock::new(None),
        }
    }

    pub fn is_built(&self) -> bool {
        self.read_snapshot().is_some()
    }

    pub fn passage_count(&self) -> usize {
        self.read_snapshot().map_or(0, |s| s.passages.len())
    }

    pub fn dimension(&self) -> Option<usize> {
        self.read_snapshot().map(|s| s.dimension)
    }

    /// Embed every passage and swap in a complete snapshot. The swap is
    /// atomic from a querier's point of view: a query sees either the
    /// previous complete index or the new one, never an intermediate.
    pub async fn build(&self, passages: Vec<Passage>) -> Result<()> {
        let texts: Vec<&str> = passages.iter().map(|p| p.text.as_str()).collect();
        let vectors = self.embed_timed(&texts).await?;

        if vectors.len() != passages.len() {
            return Err(VidchatError::EmbeddingBackend(format!(
                "embedder returned {} vectors for {} passages",
                vectors.len(),
                passages.len()
            )));
        }

        let dimension = vectors.first().map_or(self.embedder.dimension(), Vec::len);
        let count = passages.len();
        let snapshot = Arc::new(IndexSnapshot {
            passages,
            vectors,
            dimension,
        });

        *self.inner.write().expect("index lock poisoned") = Some(snapshot);
        tracing::debug!(passages = count, dimension, "semantic index built");
        Ok(())
    }

    /// Embed `text` and return the `k` nearest passages by cosine
    /// distance, nearest first. `k` is clamped to the passage count;
    /// `k = 0` returns an empty result. Ties keep insertion order.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredPassage>> {
        let snapshot = self.read_snapshot().ok_or(VidchatError::IndexNotBuilt)?;

        let k = k.min(snapshot.passages.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embed_timed(&[text])
            .await?
            .pop()
            .ok_or_else(|| VidchatError::EmbeddingBackend("empty query embedding".to_string()))?;

        if query_vec.len() != snapshot.dimension {
            return Err(VidchatError::EmbeddingBackend(format!(
                "query dimension {} does not match index dimension {}",
                query_vec.len(),
                snapshot.dimension
            )));
        }

        let mut scored: Vec<ScoredPassage> = snapshot
            .passages
            .iter()
            .zip(&snapshot.vectors)
            .map(|(passage, vector)| ScoredPassage {
                passage: passage.clone(),
                distance: cosine_distance(&query_vec, vector),
            })
            .collect();

        // Stable sort: equal distances keep passage insertion order.
        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// Discard the current snapshot, returning to the unbuilt state.
    pub fn clear(&self) {
        *self.inner.write().expect("index lock poisoned") = None;
    }

    fn read_snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.inner.read().expect("index lock poisoned").clone()
    }

    async fn embed_timed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.embedder.embed_batch(texts))
                .await
                .map_err(|_| VidchatError::EmbeddingTimeout(limit.as_secs()))?,
            None => self.embedder.embed_batch(texts).await,
        }
    }
}

/// Cosine distance: `1 - cos(a, b)`, in `[0, 2]`. Zero-norm vectors are
/// treated as maximally distant from everything.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 1.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

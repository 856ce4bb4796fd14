use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::config::{ChunkingConfig, Config};
use crate::domain::{Passage, Turn};
use crate::error::{Result, VidchatError};
use crate::ports::{AnswerBackend, TextEmbedder};
use crate::services::chunker::chunk;
use crate::services::index::SemanticIndex;
use crate::services::memory::format_history;
use crate::services::prompt::assemble;
use crate::services::retriever::Retriever;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Indexing,
    Ready,
}

/// Outcome of the indexing phase, reported separately so callers can
/// surface build progress/failure apart from question answering.
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub passage_count: usize,
    pub dimension: usize,
    pub elapsed: Duration,
}

/// Wires chunking, indexing, retrieval, memory, and generation into one
/// "ask a question" operation.
///
/// Constructed once per session with injected backend clients, then
/// driven by the caller: `build_index` once per video, `ask` per
/// question, `reset` when a new video replaces the current one. The
/// caller owns the turn history and passes it into every `ask`; history
/// is never captured at build time.
pub struct Pipeline<E: TextEmbedder, G: AnswerBackend> {
    index: SemanticIndex<E>,
    generator: Arc<G>,
    chunking: ChunkingConfig,
    retriever: Retriever,
    max_turns: usize,
    generation_timeout: Option<Duration>,
    max_retries: u32,
    state: RwLock<PipelineState>,
}

impl<E: TextEmbedder, G: AnswerBackend> Pipeline<E, G> {
    pub fn new(embedder: Arc<E>, generator: Arc<G>, config: &Config) -> Self {
        Self {
            index: SemanticIndex::new(embedder, config.embedding.timeout()),
            generator,
            chunking: config.chunking.clone(),
            retriever: Retriever::new(config.retrieval.top_k),
            max_turns: config.memory.max_turns,
            generation_timeout: config.generation.timeout(),
            max_retries: config.generation.max_retries,
            state: RwLock::new(PipelineState::Uninitialized),
        }
    }

    pub fn state(&self) -> PipelineState {
        *self.state.read().expect("state lock poisoned")
    }

    pub fn is_ready(&self) -> bool {
        self.state() == PipelineState::Ready
    }

    /// Chunk the transcript and build the semantic index. Any failure
    /// discards partial work and returns the pipeline to
    /// `Uninitialized`; success transitions to `Ready`.
    pub async fn build_index(&self, transcript: &str) -> Result<IndexStats> {
        self.set_state(PipelineState::Indexing);
        self.index.clear();

        match self.build_inner(transcript).await {
            Ok(stats) => {
                self.set_state(PipelineState::Ready);
                tracing::info!(
                    passages = stats.passage_count,
                    elapsed_s = stats.elapsed.as_secs_f64(),
                    "index built"
                );
                Ok(stats)
            }
            Err(e) => {
                self.index.clear();
                self.set_state(PipelineState::Uninitialized);
                tracing::warn!(error = %e, "index build failed");
                Err(e)
            }
        }
    }

    async fn build_inner(&self, transcript: &str) -> Result<IndexStats> {
        let started = Instant::now();
        let passages = chunk(transcript, self.chunking.size, self.chunking.overlap)?;
        tracing::debug!(passages = passages.len(), "transcript chunked");

        self.index.build(passages).await?;
        Ok(IndexStats {
            passage_count: self.index.passage_count(),
            dimension: self.index.dimension().unwrap_or(0),
            elapsed: started.elapsed(),
        })
    }

    /// Answer one question from the indexed transcript, with `turns` as
    /// the caller-owned conversation history. A failure aborts only this
    /// question: the pipeline stays `Ready` and history is untouched.
    /// The caller appends the returned answer to its history.
    pub async fn ask(&self, question: &str, turns: &[Turn]) -> Result<String> {
        if self.state() != PipelineState::Ready {
            return Err(VidchatError::PipelineNotReady);
        }

        let scored = self.retriever.retrieve(&self.index, question).await?;
        tracing::debug!(retrieved = scored.len(), "passages retrieved");

        let passages: Vec<Passage> = scored.into_iter().map(|s| s.passage).collect();
        let history = format_history(turns, self.max_turns);
        let request = assemble(history, &passages, question);

        self.generate(&request.render()).await
    }

    /// Discard the index and return to `Uninitialized`. Whether the turn
    /// history survives is the caller's policy, not the pipeline's.
    pub fn reset(&self) {
        self.index.clear();
        self.set_state(PipelineState::Uninitialized);
        tracing::debug!("pipeline reset");
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let attempts = self.max_retries + 1;
        let mut backoff = Duration::from_millis(500);
        let mut attempt = 1;

        loop {
            match self.generate_once(prompt).await {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_transient() && attempt < attempts => {
                    tracing::warn!(error = %e, attempt, "transient generation failure, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let answer = match self.generation_timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.complete(prompt))
                .await
                .map_err(|_| VidchatError::GenerationTimeout(limit.as_secs()))??,
            None => self.generator.complete(prompt).await?,
        };
        Ok(answer.trim().to_string())
    }

    fn set_state(&self, next: PipelineState) {
        *self.state.write().expect("state lock poisoned") = next;
    }
}

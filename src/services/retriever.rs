use crate::domain::ScoredPassage;
use crate::error::Result;
use crate::ports::TextEmbedder;
use crate::services::index::SemanticIndex;

/// Retrieval policy seam: how many passages each question pulls from the
/// index lives here, so it can change without touching prompt assembly.
#[derive(Debug, Clone, Copy)]
pub struct Retriever {
    k: usize,
}

impl Default for Retriever {
    fn default() -> Self {
        Self { k: 4 }
    }
}

impl Retriever {
    pub const fn new(k: usize) -> Self {
        Self { k }
    }

    pub const fn k(&self) -> usize {
        self.k
    }

    pub async fn retrieve<E: TextEmbedder>(
        &self,
        index: &SemanticIndex<E>,
        question: &str,
    ) -> Result<Vec<ScoredPassage>> {
        index.query(question, self.k).await
    }
}

pub mod chunker;
pub mod index;
pub mod memory;
pub mod pipeline;
pub mod prompt;
pub mod retriever;

pub use chunker::chunk;
pub use index::SemanticIndex;
pub use memory::format_history;
pub use pipeline::{IndexStats, Pipeline, PipelineState};
pub use prompt::assemble;
pub use retriever::Retriever;

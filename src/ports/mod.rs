pub mod embed;
pub mod generate;
pub mod transcript;

pub use embed::TextEmbedder;
pub use generate::AnswerBackend;
pub use transcript::TranscriptSource;

pub mod embedder;
pub mod groq;
pub mod transcript;

pub use embedder::FastEmbedder;
pub use groq::GroqClient;
pub use transcript::{FileTranscript, normalize_transcript};

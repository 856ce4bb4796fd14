use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidchatError {
    #[error("Transcript is empty")]
    EmptyTranscript,

    #[error("Semantic index has not been built")]
    IndexNotBuilt,

    #[error("Pipeline is not ready, build an index first")]
    PipelineNotReady,

    #[error("Embedding backend error: {0}")]
    EmbeddingBackend(String),

    #[error("Embedding timed out after {0}s")]
    EmbeddingTimeout(u64),

    #[error("Generation backend error: {0}")]
    GenerationBackend(String),

    #[error("Generation timed out after {0}s")]
    GenerationTimeout(u64),

    #[error("No captions available for video: {0}")]
    NoCaptionsAvailable(String),

    #[error("Transcript access temporarily blocked for video: {0}")]
    TranscriptAccessBlocked(String),

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Failed to fetch transcript: {0}")]
    TranscriptFetch(String),

    #[error("Invalid chunking parameters: {0}")]
    InvalidChunking(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl VidchatError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyTranscript | Self::InvalidChunking(_) => 1,
            Self::IndexNotBuilt | Self::PipelineNotReady => 2,
            Self::Config(_) => 3,
            Self::EmbeddingBackend(_) | Self::EmbeddingTimeout(_) => 4,
            Self::GenerationBackend(_) | Self::GenerationTimeout(_) => 5,
            Self::NoCaptionsAvailable(_)
            | Self::TranscriptAccessBlocked(_)
            | Self::VideoUnavailable(_)
            | Self::TranscriptFetch(_) => 6,
            Self::Io(_) | Self::Serialization(_) | Self::Http(_) => 10,
        }
    }

    /// Failures worth one bounded retry with backoff; everything else is
    /// either permanent or a caller contract violation.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingTimeout(_)
                | Self::GenerationTimeout(_)
                | Self::TranscriptAccessBlocked(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VidchatError>;

//! # vidchat
//!
//! Retrieval-augmented question answering over a video transcript.
//!
//! A transcript is split into overlapping passages, embedded into an
//! in-memory semantic index, and each question retrieves its nearest
//! passages to build a grounded prompt for a chat-completions backend.
//! Conversation history is bounded and owned by the caller.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vidchat::backends::{FastEmbedder, GroqClient};
//! use vidchat::config::Config;
//! use vidchat::domain::Turn;
//! use vidchat::services::Pipeline;
//!
//! # async fn run() -> vidchat::Result<()> {
//! let config = Config::load()?;
//! let embedder = Arc::new(FastEmbedder::new()?);
//! let generator = Arc::new(GroqClient::new(&config.generation)?);
//! let pipeline = Pipeline::new(embedder, generator, &config);
//!
//! pipeline.build_index("the transcript text ...").await?;
//!
//! let mut turns: Vec<Turn> = Vec::new();
//! let answer = pipeline.ask("What is the video about?", &turns).await?;
//! turns.push(Turn::new("What is the video about?", &answer));
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{Result, VidchatError};

#[cfg(test)]
pub(crate) mod testing;

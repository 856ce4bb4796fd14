use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidchatError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub memory: MemoryConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum passage length in characters.
    pub size: usize,
    /// Characters shared between consecutive passages.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Passages retrieved per question.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Most recent turns visible to the model.
    pub max_turns: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { max_turns: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Per-call timeout in seconds; 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

impl EmbeddingConfig {
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// Per-call timeout in seconds; 0 disables the timeout.
    pub timeout_secs: u64,
    /// Extra attempts on transient failures; 0 means exactly one request.
    pub max_retries: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "llama-3.1-8b-instant".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
            max_retries: 0,
        }
    }
}

impl GenerationConfig {
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

impl Config {
    /// Load configuration: global file, then project file, then env
    /// overrides. A present file replaces the layer below it section by
    /// section, except the API key, which falls back to the global file
    /// when the project file omits it. Missing files leave the layer
    /// below untouched.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;
        Ok(Self::layered(global, project).with_env_overrides())
    }

    fn load_global() -> Result<Option<Self>> {
        let config_dir = directories::ProjectDirs::from("", "", "vidchat").map_or_else(
            || PathBuf::from("~/.config/vidchat"),
            |d| d.config_dir().to_path_buf(),
        );

        Self::load_file(&config_dir.join("config.toml"))
    }

    fn load_project() -> Result<Option<Self>> {
        Self::load_file(&PathBuf::from("vidchat.toml"))
    }

    fn load_file(path: &PathBuf) -> Result<Option<Self>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config =
                toml::from_str(&content).map_err(|e| VidchatError::Config(e.to_string()))?;
            Ok(Some(config))
        } else {
            Ok(None)
        }
    }

    fn layered(global: Option<Self>, project: Option<Self>) -> Self {
        match (global, project) {
            (Some(global), Some(project)) => Self {
                chunking: project.chunking,
                retrieval: project.retrieval,
                memory: project.memory,
                embedding: project.embedding,
                generation: GenerationConfig {
                    api_key: project.generation.api_key.or(global.generation.api_key),
                    ..project.generation
                },
            },
            (global, project) => project.or(global).unwrap_or_default(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            self.generation.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            self.generation.model = model;
        }
        if let Ok(base) = std::env::var("VIDCHAT_API_BASE") {
            self.generation.base_url = base;
        }
        self
    }
}

//! Configuration management

use crate::error::{FormFinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Corpus source files and the mode toggle
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Answer composition settings
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Embedding provider selection
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,
}

/// Where the corpus lives and which mode is requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Metadata-only form list
    #[serde(default = "default_simple_path")]
    pub simple_path: PathBuf,

    /// Form list with extracted PDF chunks
    #[serde(default = "default_enhanced_path")]
    pub enhanced_path: PathBuf,

    /// Request enhanced mode (honoured only if `enhanced_path` exists)
    #[serde(default = "default_enhanced_mode")]
    pub enhanced_mode: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            simple_path: default_simple_path(),
            enhanced_path: default_enhanced_path(),
            enhanced_mode: default_enhanced_mode(),
        }
    }
}

fn default_simple_path() -> PathBuf {
    PathBuf::from("data/irs_forms_metadata.json")
}

fn default_enhanced_path() -> PathBuf {
    PathBuf::from("data/irs_forms_enhanced.json")
}

fn default_enhanced_mode() -> bool {
    std::env::var("FORMFINDER_ENHANCED_MODE")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// How answers are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStrategy {
    /// Generative in simple mode when a generator is available, templated otherwise
    #[default]
    Auto,
    /// Always call the generative model (simple mode only)
    Generative,
    /// Rule-based templates, no model call
    Templated,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnswerConfig {
    #[serde(default)]
    pub strategy: AnswerStrategy,
}

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI-compatible `/v1/embeddings` service
    Http,
    /// Offline hashed bag-of-words vectors
    Hashed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_provider")]
    pub provider: EmbeddingProvider,

    /// Vector size for the hashed provider
    #[serde(default = "default_hashed_dimensions")]
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            dimensions: default_hashed_dimensions(),
        }
    }
}

fn default_embedding_provider() -> EmbeddingProvider {
    if std::env::var("FORMFINDER_EMBEDDING_URL").is_ok() {
        EmbeddingProvider::Http
    } else {
        EmbeddingProvider::Hashed
    }
}

fn default_hashed_dimensions() -> usize {
    384
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the chat/completions service; no generator without it
    #[serde(default)]
    pub url: Option<String>,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (can be different from LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions (taken from the first response if not specified)
    #[serde(default)]
    pub embedding_dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Texts per embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Embedding requests in flight at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl LLMServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> Option<&str> {
        self.embedding_url.as_deref().or(self.url.as_deref())
    }

    /// Whether a chat/completions endpoint is configured
    pub fn has_generator(&self) -> bool {
        self.url.is_some()
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("FORMFINDER_LLM_URL").ok(),
            model: default_chat_model(),
            embedding_url: std::env::var("FORMFINDER_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("FORMFINDER_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok()),
            api_key: std::env::var("FORMFINDER_LLM_API_KEY").ok(),
            timeout_secs: default_timeout(),
            batch_size: default_batch_size(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("FORMFINDER_LLM_MODEL")
        .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("FORMFINDER_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string())
}

fn default_timeout() -> u64 {
    30
}

fn default_batch_size() -> usize {
    32
}

fn default_max_concurrent() -> usize {
    4
}

impl Config {
    /// Load config from `$FORMFINDER_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var("FORMFINDER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            config.validate()?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    fn validate(&self) -> Result<()> {
        if self.embedding.provider == EmbeddingProvider::Hashed && self.embedding.dimensions == 0 {
            return Err(FormFinderError::Config(
                "embedding.dimensions must be greater than zero".to_string(),
            ));
        }
        if self.embedding.provider == EmbeddingProvider::Http
            && self.llm_service.embeddings_url().is_none()
        {
            return Err(FormFinderError::Config(
                "embedding.provider is http but no embedding_url or url is set".to_string(),
            ));
        }
        if self.answer.strategy == AnswerStrategy::Generative && !self.llm_service.has_generator() {
            return Err(FormFinderError::Config(
                "answer.strategy is generative but llm_service.url is not set".to_string(),
            ));
        }
        Ok(())
    }
}

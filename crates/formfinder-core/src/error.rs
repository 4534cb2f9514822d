//! Error types for formfinder

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using FormFinderError
pub type Result<T> = std::result::Result<T, FormFinderError>;

/// Error type alias for convenience
pub type Error = FormFinderError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const UNAVAILABLE: i32 = 4;
}

/// Corpus loading failures. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("corpus file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("cannot read corpus file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("invalid form entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("duplicate chunk id '{chunk_id}' in form {form_number}")]
    DuplicateChunk {
        form_number: String,
        chunk_id: String,
    },
}

/// Main error type for formfinder
#[derive(Debug, Error)]
pub enum FormFinderError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Service not ready: corpus is still loading")]
    NotReady,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl FormFinderError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FormNotFound(_) | Self::Load(LoadError::Missing(_)) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            Self::NotReady => exit_codes::UNAVAILABLE,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}

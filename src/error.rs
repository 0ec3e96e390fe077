use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexCheckError>;

#[derive(Error, Debug)]
pub enum IndexCheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {0:?}")]
    ConfigNotFound(PathBuf),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Gave up after {attempts} attempts, last status {status}")]
    RetriesExhausted { status: u16, attempts: u32 },

    #[error("Parse error: {0}")]
    Parse(String),

    /// `general.empty` was present but not `true`. There is no defined
    /// result count for this shape, so the run stops here.
    #[error("Unhandled empty status for {domain}: {value}")]
    UnhandledEmptyStatus {
        domain: String,
        value: serde_json::Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Parse,
    LatentLogicGap,
}

impl IndexCheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexCheckError::Config(_) | IndexCheckError::ConfigNotFound(_) => ErrorKind::Config,
            IndexCheckError::Transport(_)
            | IndexCheckError::HttpStatus { .. }
            | IndexCheckError::RetriesExhausted { .. } => ErrorKind::Transport,
            IndexCheckError::Parse(_) => ErrorKind::Parse,
            IndexCheckError::UnhandledEmptyStatus { .. } => ErrorKind::LatentLogicGap,
        }
    }
}

// Conversion implementations for common error types
impl From<std::io::Error> for IndexCheckError {
    fn from(err: std::io::Error) -> Self {
        IndexCheckError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for IndexCheckError {
    fn from(err: serde_json::Error) -> Self {
        IndexCheckError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for IndexCheckError {
    fn from(err: config::ConfigError) -> Self {
        IndexCheckError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for IndexCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            IndexCheckError::Parse(err.to_string())
        } else {
            IndexCheckError::Transport(err.to_string())
        }
    }
}

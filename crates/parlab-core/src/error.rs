//! Error types for parlab

use thiserror::Error;

/// Main error type for parlab
#[derive(Error, Debug)]
pub enum ParlabError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parlab operations
pub type Result<T> = std::result::Result<T, ParlabError>;

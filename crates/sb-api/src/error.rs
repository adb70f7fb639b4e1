//! Error types for sb-api

use thiserror::Error;

/// sb-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to bind {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

//! Error types for SpinRig

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum SrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("State error: {0}")]
    State(String),
}

/// Result type alias
pub type SrResult<T> = Result<T, SrError>;

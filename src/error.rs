// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevealError {
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),

    #[error("shape mismatch: expected {expected} bytes, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("image codec failure: {0}")]
    Codec(String),

    #[error("key derivation did not finish within {deadline_ms} ms")]
    KdfDeadline { deadline_ms: u128 },

    #[error("config file error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for RevealError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => RevealError::Io(io),
            other => RevealError::Codec(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for RevealError {
    fn from(err: walkdir::Error) -> Self {
        RevealError::Io(err.into())
    }
}

pub type Result<T> = std::result::Result<T, RevealError>;

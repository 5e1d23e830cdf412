use std::io;
use thiserror::Error;

/// Error type for cttv-io operations.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output file could not be created.
    #[error("Can't create output file: {0}")]
    FileCreateError(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialise evidence string: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cttv-io operations.
pub type Result<T> = std::result::Result<T, OutputError>;

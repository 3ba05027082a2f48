//! Error type for the tools.

use std::path::PathBuf;

use basescape_core::error::GameError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while loading, validating or exporting data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Engine error (parsing, rule resolution, placement).
    #[error(transparent)]
    Core(#[from] GameError),

    /// Failed to read or write a file.
    #[error("IO error at '{path}': {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Failed to encode an image.
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to serialize a report.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line argument out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data directory failed validation.
    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// Some bases could not be rendered.
    #[error("{0} base(s) failed to render")]
    RenderFailed(usize),
}

impl ToolError {
    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

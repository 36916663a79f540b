//! Render error type.

use thiserror::Error;

/// Rendering error.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Histograms handed to a renderer that cannot draw them.
    #[error("invalid renderer input: {0}")]
    Input(String),

    /// Failure writing the output image.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, RenderError>;

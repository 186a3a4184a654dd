//! Error types for cloudthumb

use thiserror::Error;

/// Main error type for thumbnail rendering.
///
/// Every variant is terminal for a single render request. Rendering is a
/// pure function of its input, so callers should not retry and instead show
/// a placeholder thumbnail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Point cloud contains no points")]
    EmptyInput,

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Invalid canvas size: {0}")]
    InvalidCanvasSize(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Whether the failure was caused by the input file rather than the
    /// environment the renderer runs in.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Decode(_)
                | Error::EmptyInput
                | Error::DegenerateGeometry(_)
                | Error::UnsupportedFormat(_)
        )
    }
}

/// Result type alias for cloudthumb operations
pub type Result<T> = std::result::Result<T, Error>;

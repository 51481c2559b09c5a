//! I/O error types
//!
//! Provides a unified error type for all volume I/O operations.
//! Each format-specific module maps its underlying library errors
//! into `IoError` variants so that callers only need to handle
//! one error type.

use thiserror::Error;

/// Error type for volume I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file format, element type or layout is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file data is structurally invalid
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] spotfishing_core::Error),
}

impl From<ndarray::ShapeError> for IoError {
    fn from(e: ndarray::ShapeError) -> Self {
        IoError::InvalidData(format!("array shape: {e}"))
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;

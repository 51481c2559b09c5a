//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to load a test volume
    #[error("failed to load volume '{path}': {message}")]
    VolumeLoad { path: String, message: String },

    /// Loaded data is not a 3D intensity volume
    #[error("'{path}' is not a 3D intensity volume")]
    NotAVolume { path: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

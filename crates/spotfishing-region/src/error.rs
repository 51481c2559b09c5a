//! Error types for spotfishing-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spotfishing_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Distance transform without any feature voxels
    #[error("no feature voxels to measure distances from")]
    NoFeatures,

    /// Label count exceeded the label type
    #[error("too many regions: more than {0} labels")]
    TooManyLabels(u32),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

//! Error types for spotfishing-detect

use spotfishing_core::PixelKind;
use thiserror::Error;

/// Errors that can occur during spot detection
#[derive(Debug, Error)]
pub enum DetectError {
    /// Input elements are not scalar intensities
    #[error("type mismatch: expected {expected}, got {actual} array")]
    TypeMismatch {
        expected: &'static str,
        actual: PixelKind,
    },

    /// Input does not have the required number of dimensions
    #[error("expected {expected}D input image but got {actual}-dimensional")]
    Dimensionality { expected: usize, actual: usize },

    /// A record lacks a required field
    #[error("missing key: {0}")]
    MissingKey(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spotfishing_core::Error),

    /// Smoothing failed
    #[error("filter error: {0}")]
    Filter(#[from] spotfishing_filter::FilterError),

    /// Morphology failed
    #[error("morphology error: {0}")]
    Morph(#[from] spotfishing_morph::MorphError),

    /// Labeling or measurement failed
    #[error("region error: {0}")]
    Region(#[from] spotfishing_region::RegionError),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;

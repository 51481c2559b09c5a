//! Error types for spotfishing-core
//!
//! Provides a unified error type for the shared data structures: dynamic
//! images, volumes and region tables. Each variant captures enough context
//! for diagnostics without exposing internal layout.

use thiserror::Error;

/// spotfishing-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Two arrays that must share a shape do not
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested column does not exist in a table
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A column with this name already exists in a table
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column length disagrees with the table's row count
    #[error("column '{name}' has {actual} values but table has {expected} rows")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Row index out of bounds
    #[error("row index out of bounds: {index} >= {len}")]
    RowOutOfBounds { index: usize, len: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

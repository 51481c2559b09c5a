//! spotfishing-core - Basic data structures for spot detection
//!
//! This crate provides the data structures shared by every stage of the
//! spot-detection pipeline:
//!
//! - [`ImageData`] - N-dimensional image with a runtime element kind
//! - [`Volume`] / [`LabelMap`] - 3D working arrays (z, y, x)
//! - [`Table`] / [`TableRow`] - Named numeric columns with a row index
//! - [`Record`] - Key-based field lookup over rows and maps
//! - [`ImagePoint3D`] - A point in image space
//! - [`keys`] - Canonical column names for region tables

pub mod error;
pub mod image;
pub mod keys;
pub mod point;
pub mod record;
pub mod table;

pub use error::{Error, Result};
pub use image::{ImageData, LabelMap, PixelKind, Volume};
pub use keys::{
    DETECTION_TABLE_COLUMNS, ROI_AREA_KEY, ROI_MEAN_INTENSITY_KEY, RoiCenterKeys,
};
pub use point::ImagePoint3D;
pub use record::Record;
pub use table::{Table, TableRow};

/// Check that two arrays share a shape
///
/// # Errors
///
/// Returns `Error::ShapeMismatch` if they differ.
pub fn check_same_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected != actual {
        return Err(Error::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

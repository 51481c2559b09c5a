//! Tools for working with detected regions

use crate::error::{DetectError, DetectResult};
use spotfishing_core::{ImagePoint3D, Record, RoiCenterKeys};

/// Get a region's centroid from a record
///
/// Reads the `zc`, `yc` and `xc` fields of a table row or any map from
/// column name to value.
///
/// # Errors
///
/// Returns `DetectError::MissingKey` naming the first absent key.
pub fn get_centroid_from_record<R: Record + ?Sized>(record: &R) -> DetectResult<ImagePoint3D> {
    let get = |key: RoiCenterKeys| {
        record
            .field(key.key())
            .ok_or_else(|| DetectError::MissingKey(key.key().to_string()))
    };
    Ok(ImagePoint3D::new(
        get(RoiCenterKeys::Z)?,
        get(RoiCenterKeys::Y)?,
        get(RoiCenterKeys::X)?,
    ))
}

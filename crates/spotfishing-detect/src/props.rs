//! Region post-processing and measurement
//!
//! Both detectors finish here: optional label expansion, per-region
//! measurement and conversion of the raw measurement table into the
//! detection schema.

use crate::error::DetectResult;
use log::debug;
use spotfishing_core::keys::{
    REGIONPROPS_TABLE_COLUMNS_EXPANDED, ROI_CENTROID_COLUMN_RENAMING, ROI_LABEL_KEY,
};
use spotfishing_core::{LabelMap, Table, Volume};
use spotfishing_region::{expand_labels, regionprops_table};

/// Measure labeled regions and build the detection table
///
/// If `expand_px` is present and non-zero, regions are first grown by that
/// Euclidean distance without merging. The returned table has the columns
/// `zc, yc, xc, area, intensity_mean` and a dense `0..n` row index; the
/// returned label map is the one that was measured.
///
/// # Errors
///
/// Returns an error if `labels` and `intensity` differ in shape.
pub fn build_props_table(
    labels: LabelMap,
    intensity: &Volume,
    expand_px: Option<f64>,
) -> DetectResult<(Table, LabelMap)> {
    let labels = match expand_px {
        Some(px) if px != 0.0 => {
            debug!("build_props_table: expanding labels by {px}");
            expand_labels(&labels, px)?
        }
        _ => labels,
    };

    let mut table = if labels.iter().all(|&l| l == 0) {
        Table::with_columns(&REGIONPROPS_TABLE_COLUMNS_EXPANDED)?
    } else {
        regionprops_table(&labels, intensity)?
    };
    table.drop_columns(&[ROI_LABEL_KEY], true)?;
    table.rename_columns(&ROI_CENTROID_COLUMN_RENAMING)?;
    table.reset_index();

    debug!("build_props_table: {} regions", table.n_rows());
    Ok((table, labels))
}

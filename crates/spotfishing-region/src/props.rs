//! Region property measurement
//!
//! Measures each labeled region of a label map against an intensity
//! volume. Sums run over the region's voxels in raster order.

use crate::error::RegionResult;
use log::debug;
use spotfishing_core::keys::{
    RAW_CENTROID_COLUMNS, REGIONPROPS_TABLE_COLUMNS_EXPANDED, ROI_AREA_KEY, ROI_LABEL_KEY,
    ROI_MEAN_INTENSITY_KEY,
};
use spotfishing_core::{LabelMap, Table, Volume, check_same_shape};
use std::collections::BTreeMap;

/// Measurements of one labeled region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProps {
    /// Label id of the region
    pub label: u32,
    /// Number of voxels
    pub area: usize,
    /// Mean voxel coordinate, (z, y, x)
    pub centroid: [f64; 3],
    /// Mean intensity over the region's voxels
    pub intensity_mean: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    coord_sum: [f64; 3],
    intensity_sum: f64,
}

/// Measure every region of a label map
///
/// Regions are returned in increasing label order. Labels that do not occur
/// in the map are skipped.
///
/// # Errors
///
/// Returns a shape mismatch error if `labels` and `intensity` differ in
/// shape.
pub fn regionprops(labels: &LabelMap, intensity: &Volume) -> RegionResult<Vec<RegionProps>> {
    check_same_shape(labels.shape(), intensity.shape())?;

    let mut acc: BTreeMap<u32, Accumulator> = BTreeMap::new();
    for (((z, y, x), &l), &v) in labels.indexed_iter().zip(intensity.iter()) {
        if l == 0 {
            continue;
        }
        let a = acc.entry(l).or_default();
        a.count += 1;
        a.coord_sum[0] += z as f64;
        a.coord_sum[1] += y as f64;
        a.coord_sum[2] += x as f64;
        a.intensity_sum += v;
    }

    let props: Vec<RegionProps> = acc
        .into_iter()
        .map(|(label, a)| {
            let n = a.count as f64;
            RegionProps {
                label,
                area: a.count,
                centroid: a.coord_sum.map(|s| s / n),
                intensity_mean: a.intensity_sum / n,
            }
        })
        .collect();
    debug!("regionprops: measured {} regions", props.len());
    Ok(props)
}

/// Measure every region and collect the results in a table
///
/// Columns are `label`, `centroid-0`, `centroid-1`, `centroid-2`, `area`
/// and `intensity_mean`; the row index holds the label ids. A map without
/// regions gives a table with these columns and no rows.
///
/// # Errors
///
/// Returns a shape mismatch error if `labels` and `intensity` differ in
/// shape.
pub fn regionprops_table(labels: &LabelMap, intensity: &Volume) -> RegionResult<Table> {
    let props = regionprops(labels, intensity)?;

    let mut table = Table::new();
    table.push_column(ROI_LABEL_KEY, props.iter().map(|p| p.label as f64).collect())?;
    for (axis, name) in RAW_CENTROID_COLUMNS.iter().enumerate() {
        table.push_column(*name, props.iter().map(|p| p.centroid[axis]).collect())?;
    }
    table.push_column(ROI_AREA_KEY, props.iter().map(|p| p.area as f64).collect())?;
    table.push_column(
        ROI_MEAN_INTENSITY_KEY,
        props.iter().map(|p| p.intensity_mean).collect(),
    )?;
    table.set_index(props.iter().map(|p| p.label as usize).collect())?;
    debug_assert_eq!(table.column_names(), REGIONPROPS_TABLE_COLUMNS_EXPANDED);
    Ok(table)
}

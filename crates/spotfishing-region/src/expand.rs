//! Label expansion
//!
//! Grows labeled regions into the surrounding background without letting
//! them overlap. Every background voxel within the expansion distance takes
//! the label of its nearest labeled voxel, so regions that would collide
//! meet along the equidistant surface instead of merging.

use crate::distance::distance_transform_edt;
use crate::error::RegionResult;
use log::debug;
use spotfishing_core::LabelMap;

/// Expand labels by up to `distance` voxels (Euclidean)
///
/// Voxels whose distance to the nearest labeled voxel is at most `distance`
/// receive that voxel's label; all others become background. Labeled
/// voxels keep their labels. A volume without labels is returned unchanged.
pub fn expand_labels(labels: &LabelMap, distance: f64) -> RegionResult<LabelMap> {
    if labels.iter().all(|&l| l == 0) {
        return Ok(labels.clone());
    }

    let ft = distance_transform_edt(&labels.mapv(|l| l == 0))?;
    let mut expanded = LabelMap::zeros(labels.dim());
    for ((out, &d), &nearest) in expanded
        .iter_mut()
        .zip(ft.distances.iter())
        .zip(ft.indices.iter())
    {
        if d <= distance {
            *out = labels[nearest];
        }
    }

    debug!(
        "expand_labels: distance {distance}, {} -> {} labeled voxels",
        labels.iter().filter(|&&l| l != 0).count(),
        expanded.iter().filter(|&&l| l != 0).count()
    );
    Ok(expanded)
}

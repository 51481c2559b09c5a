//! Component selection by size

use crate::conncomp::component_sizes;
use log::debug;
use spotfishing_core::LabelMap;

/// Remove labeled components smaller than `min_size` voxels
///
/// Voxels of each small component are set to background. Surviving labels
/// keep their original ids, so the result may have gaps in its numbering.
pub fn remove_small_objects(labels: &LabelMap, min_size: usize) -> LabelMap {
    let sizes = component_sizes(labels);
    let removed = sizes.values().filter(|&&n| n < min_size).count();
    debug!("remove_small_objects: {removed} components below {min_size} voxels removed");

    labels.mapv(|l| match sizes.get(&l) {
        Some(&n) if n < min_size => 0,
        _ => l,
    })
}

/// Keep only components with at least `min_size` and at most `max_size`
/// voxels
pub fn select_by_size(labels: &LabelMap, min_size: usize, max_size: usize) -> LabelMap {
    let sizes = component_sizes(labels);
    labels.mapv(|l| match sizes.get(&l) {
        Some(n) if (min_size..=max_size).contains(n) => l,
        _ => 0,
    })
}

//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected
//! components in binary volumes. Components are flood-filled from their
//! first voxel in raster (z, y, x) order, so label ids follow the order in
//! which components are first encountered.

use crate::error::{RegionError, RegionResult};
use log::debug;
use ndarray::Array3;
use spotfishing_core::LabelMap;
use std::collections::{BTreeMap, VecDeque};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 6-way connectivity (voxels sharing a face)
    #[default]
    Face,
    /// 18-way connectivity (voxels sharing a face or an edge)
    Edge,
    /// 26-way connectivity (voxels sharing a face, edge or corner)
    Full,
}

impl Connectivity {
    /// Neighbor offsets for this connectivity, excluding the origin
    pub fn offsets(self) -> Vec<[isize; 3]> {
        let max_nonzero = match self {
            Connectivity::Face => 1,
            Connectivity::Edge => 2,
            Connectivity::Full => 3,
        };
        let mut offsets = Vec::with_capacity(26);
        for dz in -1isize..=1 {
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nonzero = [dz, dy, dx].iter().filter(|&&d| d != 0).count();
                    if nonzero > 0 && nonzero <= max_nonzero {
                        offsets.push([dz, dy, dx]);
                    }
                }
            }
        }
        offsets
    }
}

/// Neighbors of a voxel that lie inside a volume of the given shape
pub(crate) fn neighbors(
    (z, y, x): (usize, usize, usize),
    (d, h, w): (usize, usize, usize),
    offsets: &[[isize; 3]],
) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
    offsets.iter().filter_map(move |[dz, dy, dx]| {
        let nz = z.checked_add_signed(*dz)?;
        let ny = y.checked_add_signed(*dy)?;
        let nx = x.checked_add_signed(*dx)?;
        (nz < d && ny < h && nx < w).then_some((nz, ny, nx))
    })
}

/// Label all connected components in a binary volume
///
/// # Arguments
///
/// * `mask` - Foreground voxels are `true`
/// * `connectivity` - Which neighbors count as connected
///
/// # Returns
///
/// The label map (0 for background, 1..=n for components) and the number
/// of components `n`.
///
/// # Errors
///
/// Returns `RegionError::TooManyLabels` if the component count overflows
/// `u32`.
pub fn label_components(
    mask: &Array3<bool>,
    connectivity: Connectivity,
) -> RegionResult<(LabelMap, u32)> {
    let shape = mask.dim();
    let offsets = connectivity.offsets();
    let mut labels = LabelMap::zeros(shape);
    let mut count = 0u32;
    let mut queue = VecDeque::new();

    for (start, &fg) in mask.indexed_iter() {
        if !fg || labels[start] != 0 {
            continue;
        }
        count = count
            .checked_add(1)
            .ok_or(RegionError::TooManyLabels(u32::MAX))?;
        labels[start] = count;
        queue.push_back(start);

        while let Some(voxel) = queue.pop_front() {
            for n in neighbors(voxel, shape, &offsets) {
                if mask[n] && labels[n] == 0 {
                    labels[n] = count;
                    queue.push_back(n);
                }
            }
        }
    }

    debug!(
        "label_components: {count} components ({connectivity:?}) in {:?}",
        shape
    );
    Ok((labels, count))
}

/// Count the voxels carrying each label
///
/// Keys are the non-zero labels present, in increasing order; background
/// is not counted. Label ids need not be contiguous.
pub fn component_sizes(labels: &LabelMap) -> BTreeMap<u32, usize> {
    let mut sizes = BTreeMap::new();
    for &l in labels.iter().filter(|&&l| l != 0) {
        *sizes.entry(l).or_insert(0) += 1;
    }
    sizes
}

/// Number of distinct non-zero labels present
pub fn count_labels(labels: &LabelMap) -> usize {
    component_sizes(labels).len()
}

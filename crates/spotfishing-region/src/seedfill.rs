//! Seed fill operations
//!
//! This module provides flood fill from a set of seeds and binary hole
//! filling for 3D masks.

use crate::conncomp::{Connectivity, neighbors};
use log::trace;
use ndarray::Array3;
use std::collections::VecDeque;

/// Flood fill the background reachable from seed voxels
///
/// Starting from every seed that is background in `mask`, marks all
/// background voxels connected to it. Foreground voxels act as walls.
///
/// # Returns
///
/// A mask of the reached background voxels.
pub fn flood_background<I>(mask: &Array3<bool>, seeds: I, connectivity: Connectivity) -> Array3<bool>
where
    I: IntoIterator<Item = (usize, usize, usize)>,
{
    let shape = mask.dim();
    let offsets = connectivity.offsets();
    let mut reached = Array3::from_elem(shape, false);
    let mut queue = VecDeque::new();

    for seed in seeds {
        if !mask[seed] && !reached[seed] {
            reached[seed] = true;
            queue.push_back(seed);
        }
    }

    while let Some(voxel) = queue.pop_front() {
        for n in neighbors(voxel, shape, &offsets) {
            if !mask[n] && !reached[n] {
                reached[n] = true;
                queue.push_back(n);
            }
        }
    }
    reached
}

/// Voxels on the outer faces of a volume
fn border_voxels((d, h, w): (usize, usize, usize)) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..d).flat_map(move |z| {
        (0..h).flat_map(move |y| {
            (0..w).filter_map(move |x| {
                let on_border =
                    z == 0 || y == 0 || x == 0 || z + 1 == d || y + 1 == h || x + 1 == w;
                on_border.then_some((z, y, x))
            })
        })
    })
}

/// Fill holes in a binary volume
///
/// A hole is a background voxel that cannot reach the volume border through
/// background voxels. `connectivity` controls how the background connects;
/// face connectivity is the usual choice and keeps diagonal gaps in a
/// surface from letting the background leak in.
pub fn fill_holes(mask: &Array3<bool>, connectivity: Connectivity) -> Array3<bool> {
    let outside = flood_background(mask, border_voxels(mask.dim()), connectivity);
    let filled = outside.mapv(|reached| !reached);
    trace!(
        "fill_holes: {} voxels filled",
        filled.iter().filter(|&&v| v).count() - mask.iter().filter(|&&v| v).count()
    );
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hollow_cube(n: usize) -> Array3<bool> {
        Array3::from_shape_fn((n, n, n), |(z, y, x)| {
            let inside = |i: usize| i >= 1 && i + 2 <= n;
            let interior = |i: usize| i >= 2 && i + 3 <= n;
            inside(z) && inside(y) && inside(x) && !(interior(z) && interior(y) && interior(x))
        })
    }

    #[test]
    fn test_fill_enclosed_cavity() {
        let mask = hollow_cube(7);
        assert!(!mask[[3, 3, 3]]);
        let filled = fill_holes(&mask, Connectivity::Face);
        assert!(filled[[3, 3, 3]]);
        assert!(filled[[2, 2, 2]]);
        assert!(!filled[[0, 0, 0]]);
        assert!(!filled[[6, 3, 3]]);
    }

    #[test]
    fn test_open_cavity_not_filled() {
        let mut mask = hollow_cube(7);
        // Punch a hole in the top face
        mask[[1, 3, 3]] = false;
        let filled = fill_holes(&mask, Connectivity::Face);
        assert!(!filled[[3, 3, 3]]);
        assert_eq!(filled, mask);
    }

    #[test]
    fn test_fill_keeps_foreground() {
        let mask = hollow_cube(6);
        let filled = fill_holes(&mask, Connectivity::Face);
        assert!(mask.iter().zip(filled.iter()).all(|(&m, &f)| !m || f));
    }

    #[test]
    fn test_background_touching_border_survives() {
        // Foreground at the border with no enclosure
        let mut mask = Array3::from_elem((1, 3, 3), false);
        mask[[0, 0, 0]] = true;
        let filled = fill_holes(&mask, Connectivity::Face);
        assert_eq!(filled, mask);
    }

    #[test]
    fn test_flood_background_from_seed() {
        let mut mask = Array3::from_elem((1, 1, 5), false);
        mask[[0, 0, 2]] = true;
        let reached = flood_background(&mask, [(0, 0, 0)], Connectivity::Face);
        assert!(reached[[0, 0, 1]]);
        assert!(!reached[[0, 0, 3]]);
    }
}

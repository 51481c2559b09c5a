//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening, closing and the top-hat
//! transforms for 3D volumes with a flat structuring element.
//!
//! # Algorithm
//!
//! - **Dilation**: Maximum value under the reflected structuring element
//! - **Erosion**: Minimum value under the structuring element
//! - **Opening**: Erosion followed by dilation (removes small bright features)
//! - **Closing**: Dilation followed by erosion (fills small dark features)
//! - **White top-hat**: Volume minus its opening (keeps small bright features)
//!
//! Neighbours outside the volume are mirrored back inside with the edge
//! sample repeated (`d c b a | a b c d | d c b a`).

use crate::{MorphResult, Sel3d};
use log::trace;
use ndarray::Array3;
use spotfishing_core::Volume;

/// Map a possibly out-of-range index back into `0..n` by mirror reflection
#[inline]
fn reflect_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}

fn rank_filter(
    volume: &Volume,
    offsets: &[[isize; 3]],
    init: f64,
    pick: impl Fn(f64, f64) -> f64,
) -> Volume {
    let (d, h, w) = volume.dim();
    Array3::from_shape_fn((d, h, w), |(z, y, x)| {
        offsets.iter().fold(init, |acc, [dz, dy, dx]| {
            let sz = reflect_index(z as isize + dz, d);
            let sy = reflect_index(y as isize + dy, h);
            let sx = reflect_index(x as isize + dx, w);
            pick(acc, volume[[sz, sy, sx]])
        })
    })
}

/// Erode a volume with a flat structuring element
///
/// Erosion computes the minimum value in the SE neighborhood, which
/// shrinks bright regions and expands dark regions.
pub fn erode_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    trace!("erode_gray: sel={:?}, shape={:?}", sel.name(), volume.shape());
    Ok(rank_filter(volume, &sel.hit_offsets(), f64::INFINITY, f64::min))
}

/// Dilate a volume with a flat structuring element
///
/// Dilation computes the maximum value under the reflected SE, which
/// expands bright regions and shrinks dark regions.
pub fn dilate_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    trace!("dilate_gray: sel={:?}, shape={:?}", sel.name(), volume.shape());
    let offsets = sel.reflect().hit_offsets();
    Ok(rank_filter(volume, &offsets, f64::NEG_INFINITY, f64::max))
}

/// Open a volume (erosion followed by dilation)
///
/// Opening removes bright features smaller than the SE while preserving
/// the overall shape. Away from the border the result never exceeds the
/// input.
pub fn open_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    let eroded = erode_gray(volume, sel)?;
    dilate_gray(&eroded, sel)
}

/// Close a volume (dilation followed by erosion)
///
/// Closing fills dark features smaller than the SE.
pub fn close_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    let dilated = dilate_gray(volume, sel)?;
    erode_gray(&dilated, sel)
}

/// White top-hat transform (original - opening)
///
/// Extracts bright features smaller than the structuring element.
pub fn top_hat_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    let opened = open_gray(volume, sel)?;
    Ok(volume - &opened)
}

/// Black top-hat transform (closing - original)
///
/// Extracts dark features smaller than the structuring element.
pub fn bottom_hat_gray(volume: &Volume, sel: &Sel3d) -> MorphResult<Volume> {
    let closed = close_gray(volume, sel)?;
    Ok(closed - volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(shape: (usize, usize, usize), at: [usize; 3], base: f64, peak: f64) -> Volume {
        let mut v = Array3::from_elem(shape, base);
        v[at] = peak;
        v
    }

    #[test]
    fn test_reflect_index() {
        // d c b a | a b c d | d c b a
        let n = 4;
        let mapped: Vec<usize> = (-4..8).map(|i| reflect_index(i, n)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect_index(-3, 1), 0);
        assert_eq!(reflect_index(5, 2), 1);
    }

    #[test]
    fn test_erode_removes_isolated_peak() {
        let v = bump((5, 5, 5), [2, 2, 2], 10.0, 100.0);
        let sel = Sel3d::create_ball(1);
        let eroded = erode_gray(&v, &sel).unwrap();
        assert!(eroded.iter().all(|&x| x == 10.0));
    }

    #[test]
    fn test_dilate_spreads_peak_over_ball() {
        let v = bump((7, 7, 7), [3, 3, 3], 0.0, 5.0);
        let sel = Sel3d::create_ball(2);
        let dilated = dilate_gray(&v, &sel).unwrap();
        let hits = dilated.iter().filter(|&&x| x == 5.0).count();
        assert_eq!(hits, sel.hit_count());
        assert_eq!(dilated[[3, 3, 1]], 5.0);
        assert_eq!(dilated[[1, 1, 1]], 0.0);
    }

    #[test]
    fn test_top_hat_isolates_small_bright_feature() {
        let v = bump((9, 9, 9), [4, 4, 4], 20.0, 120.0);
        let sel = Sel3d::create_ball(2);
        let th = top_hat_gray(&v, &sel).unwrap();
        assert_eq!(th[[4, 4, 4]], 100.0);
        assert_eq!(th.iter().filter(|&&x| x != 0.0).count(), 1);
    }

    #[test]
    fn test_top_hat_of_constant_is_zero() {
        let v = Array3::from_elem((3, 4, 5), 42.0);
        let th = top_hat_gray(&v, &Sel3d::create_ball(2)).unwrap();
        assert!(th.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_opening_and_closing_bounds() {
        let mut v = Array3::zeros((6, 6, 6));
        for (i, x) in v.iter_mut().enumerate() {
            *x = ((i * 37) % 11) as f64;
        }
        let sel = Sel3d::create_ball(1);
        let opened = open_gray(&v, &sel).unwrap();
        let closed = close_gray(&v, &sel).unwrap();
        let bh = bottom_hat_gray(&v, &sel).unwrap();
        // Two passes of radius 1 never reach the mirrored border from here
        for z in 2..4 {
            for y in 2..4 {
                for x in 2..4 {
                    let p = [z, y, x];
                    assert!(opened[p] <= v[p]);
                    assert!(closed[p] >= v[p]);
                    assert!(bh[p] >= 0.0);
                }
            }
        }
    }
}

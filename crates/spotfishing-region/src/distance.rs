//! Euclidean distance transform
//!
//! Exact squared Euclidean distances are computed one axis at a time with
//! the lower envelope of parabolas (Felzenszwalb and Huttenlocher). Each
//! pass also carries the coordinates of the feature voxel that produced the
//! minimum, which yields the feature transform: for every voxel, the
//! nearest feature voxel.
//!
//! When two feature voxels are equally near, the one reached first along
//! the last processed axis wins; no other tie-breaking is guaranteed.

use crate::error::{RegionError, RegionResult};
use log::trace;
use ndarray::{Array3, Axis, Zip};
use spotfishing_core::Volume;

/// Coordinates of a voxel, (z, y, x)
pub type VoxelIndex = [usize; 3];

/// Distances and nearest-feature coordinates for every voxel
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTransform {
    /// Euclidean distance to the nearest feature voxel
    pub distances: Volume,
    /// Coordinates of the nearest feature voxel
    pub indices: Array3<VoxelIndex>,
}

/// Compute the feature transform of a volume
///
/// `features` marks the voxels distances are measured to. Feature voxels
/// get distance 0 and their own coordinates.
///
/// # Errors
///
/// Returns `RegionError::NoFeatures` if no voxel is a feature.
pub fn feature_transform(features: &Array3<bool>) -> RegionResult<FeatureTransform> {
    if !features.iter().any(|&f| f) {
        return Err(RegionError::NoFeatures);
    }

    let mut sq = features.mapv(|f| if f { 0.0 } else { f64::INFINITY });
    let mut indices = Array3::from_shape_fn(features.dim(), |(z, y, x)| [z, y, x]);

    for axis in 0..3 {
        Zip::from(sq.lanes_mut(Axis(axis)))
            .and(indices.lanes_mut(Axis(axis)))
            .for_each(|mut sq_lane, mut idx_lane| {
                let f: Vec<f64> = sq_lane.to_vec();
                let idx: Vec<VoxelIndex> = idx_lane.to_vec();
                let (out_f, out_idx) = lower_envelope(&f, &idx);
                sq_lane.assign(&ndarray::ArrayView1::from(&out_f));
                for (dst, src) in idx_lane.iter_mut().zip(out_idx) {
                    *dst = src;
                }
            });
        trace!("feature_transform: axis {axis} done");
    }

    Ok(FeatureTransform {
        distances: sq.mapv(f64::sqrt),
        indices,
    })
}

/// Euclidean distance transform of a binary mask
///
/// Every `true` voxel receives its distance to the nearest `false` voxel,
/// together with that voxel's coordinates. `false` voxels have distance 0.
///
/// # Errors
///
/// Returns `RegionError::NoFeatures` if the mask has no `false` voxel.
pub fn distance_transform_edt(mask: &Array3<bool>) -> RegionResult<FeatureTransform> {
    feature_transform(&mask.mapv(|m| !m))
}

/// One-dimensional squared distance transform of a sampled function
///
/// `f[i]` is the squared distance already accumulated at position `i`
/// (infinite where nothing is known). Returns the minimum over `j` of
/// `(i - j)^2 + f[j]` and the index carried by the minimizing `j`.
fn lower_envelope(f: &[f64], idx: &[VoxelIndex]) -> (Vec<f64>, Vec<VoxelIndex>) {
    let n = f.len();
    let mut out_f = vec![f64::INFINITY; n];
    let mut out_idx = idx.to_vec();

    // Parabola vertices and the boundaries between them
    let mut v: Vec<usize> = Vec::with_capacity(n);
    let mut z: Vec<f64> = Vec::with_capacity(n + 1);

    for q in (0..n).filter(|&q| f[q].is_finite()) {
        let qf = q as f64;
        let mut s = f64::NEG_INFINITY;
        while let Some(&p) = v.last() {
            let pf = p as f64;
            s = ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf));
            if v.len() > 1 && s <= z[z.len() - 1] {
                v.pop();
                z.pop();
            } else {
                break;
            }
        }
        if v.is_empty() {
            s = f64::NEG_INFINITY;
        }
        v.push(q);
        z.push(s);
    }

    if v.is_empty() {
        return (out_f, out_idx);
    }

    let mut k = 0;
    for q in 0..n {
        let qf = q as f64;
        while k + 1 < v.len() && z[k + 1] < qf {
            k += 1;
        }
        let p = v[k];
        let d = qf - p as f64;
        out_f[q] = d * d + f[p];
        out_idx[q] = idx[p];
    }
    (out_f, out_idx)
}

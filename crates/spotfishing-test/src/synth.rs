//! Synthetic volumes for tests
//!
//! Seeded builders for noisy backgrounds with Gaussian blobs, so tests can
//! place spots at known positions and get the same volume on every run.

use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spotfishing_core::Volume;

/// Uniform noise around a constant background
///
/// Every voxel is `base` plus a value drawn uniformly from
/// `[-amplitude, amplitude]`.
pub fn noisy_background(
    shape: (usize, usize, usize),
    base: f64,
    amplitude: f64,
    seed: u64,
) -> Volume {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::from_shape_simple_fn(shape, || {
        if amplitude > 0.0 {
            base + rng.random_range(-amplitude..=amplitude)
        } else {
            base
        }
    })
}

/// Add an isotropic Gaussian blob centered at `center` (z, y, x)
///
/// Only voxels within four standard deviations are touched.
pub fn stamp_gaussian_blob(volume: &mut Volume, center: [f64; 3], sigma: f64, amplitude: f64) {
    let reach = (4.0 * sigma).ceil();
    let dims = volume.dim();
    let dims = [dims.0, dims.1, dims.2];
    let range = |axis: usize| {
        let lo = (center[axis] - reach).floor().max(0.0) as usize;
        let hi = ((center[axis] + reach).ceil() as usize).min(dims[axis].saturating_sub(1));
        lo..=hi
    };
    let two_var = 2.0 * sigma * sigma;
    for z in range(0) {
        for y in range(1) {
            for x in range(2) {
                let dz = z as f64 - center[0];
                let dy = y as f64 - center[1];
                let dx = x as f64 - center[2];
                volume[[z, y, x]] += amplitude * (-(dz * dz + dy * dy + dx * dx) / two_var).exp();
            }
        }
    }
}

/// Background with blobs at the given centers
pub fn blob_volume(
    shape: (usize, usize, usize),
    centers: &[[f64; 3]],
    sigma: f64,
    amplitude: f64,
    seed: u64,
) -> Volume {
    let mut volume = noisy_background(shape, 100.0, 5.0, seed);
    for &center in centers {
        stamp_gaussian_blob(&mut volume, center, sigma, amplitude);
    }
    volume
}

/// Round a volume to `u16`, clamping to the type's range
pub fn to_u16(volume: &Volume) -> Array3<u16> {
    volume.mapv(|v| v.round().clamp(0.0, f64::from(u16::MAX)) as u16)
}

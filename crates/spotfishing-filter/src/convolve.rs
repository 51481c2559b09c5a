//! Separable correlation and Gaussian smoothing
//!
//! Implements correlation of a volume with a 1D kernel along one axis, and
//! isotropic Gaussian smoothing as three such passes (z, then y, then x).
//!
//! Samples outside the volume take the value of the nearest edge sample
//! (replicate border), so a constant volume is left unchanged.

use crate::{FilterError, FilterResult, GAUSSIAN_TRUNCATE, Kernel1d};
use log::trace;
use ndarray::{Axis, Zip};
use spotfishing_core::Volume;

/// Correlate a volume with a 1D kernel along one axis
///
/// # Arguments
///
/// * `volume` - Input volume
/// * `axis` - 0 (z), 1 (y) or 2 (x)
/// * `kernel` - Correlation weights
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `axis > 2`.
pub fn correlate1d(volume: &Volume, axis: usize, kernel: &Kernel1d) -> FilterResult<Volume> {
    if axis > 2 {
        return Err(FilterError::InvalidParameters(format!(
            "axis must be 0, 1 or 2 for a volume, got {axis}"
        )));
    }
    if kernel.len() == 1 {
        return Ok(volume * kernel.weights()[0]);
    }

    let radius = kernel.radius() as isize;
    let weights = kernel.weights();
    let mut out = Volume::zeros(volume.raw_dim());

    Zip::from(out.lanes_mut(Axis(axis)))
        .and(volume.lanes(Axis(axis)))
        .for_each(|mut dst, src| {
            let last = src.len() as isize - 1;
            for q in 0..src.len() {
                let mut sum = 0.0;
                for (k, w) in weights.iter().enumerate() {
                    // Clamp to image boundaries (replicate border)
                    let s = (q as isize + k as isize - radius).clamp(0, last);
                    sum += w * src[s as usize];
                }
                dst[q] = sum;
            }
        });

    Ok(out)
}

/// Smooth a volume with an isotropic Gaussian
///
/// The kernel extends to [`GAUSSIAN_TRUNCATE`] standard deviations. A
/// `sigma` of zero returns a copy of the input.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `sigma` is negative or not
/// finite.
pub fn gaussian_filter(volume: &Volume, sigma: f64) -> FilterResult<Volume> {
    let kernel = Kernel1d::gaussian(sigma, GAUSSIAN_TRUNCATE)?;
    trace!(
        "gaussian_filter: sigma={sigma}, radius={}, shape={:?}",
        kernel.radius(),
        volume.shape()
    );
    if kernel.len() == 1 {
        return Ok(volume.clone());
    }

    let mut out = correlate1d(volume, 0, &kernel)?;
    for axis in 1..3 {
        out = correlate1d(&out, axis, &kernel)?;
    }
    Ok(out)
}

//! Difference-of-Gaussians enhancement
//!
//! Turns a raw intensity volume into a unitless, zero-centered image in
//! which small bright blobs stand out:
//!
//! 1. white top-hat with a ball to remove smooth background
//! 2. narrow Gaussian minus wide Gaussian of the top-hat
//! 3. division by a broad Gaussian of the raw input
//! 4. z-score over the whole volume
//!
//! Constant or all-zero inputs give non-finite values, which never exceed a
//! threshold and so produce no spots.

use crate::error::DetectResult;
use log::debug;
use spotfishing_core::Volume;
use spotfishing_filter::gaussian_filter;
use spotfishing_morph::{Sel3d, top_hat_gray};

/// Default ball radius of the top-hat structuring element
pub const DEFAULT_TOPHAT_RADIUS: usize = 2;

/// Default sigma of the narrow smoothing
pub const DEFAULT_NARROW_SIGMA: f64 = 0.8;

/// Default sigma of the wide smoothing
pub const DEFAULT_WIDE_SIGMA: f64 = 1.3;

/// Default sigma of the baseline used for normalization
pub const DEFAULT_NORMALIZATION_SIGMA: f64 = 3.0;

/// Parameters of the difference-of-Gaussians enhancement
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceOfGaussiansTransformation {
    /// Radius of the top-hat ball
    pub tophat_radius: usize,
    /// Sigma of the narrow Gaussian
    pub narrow_sigma: f64,
    /// Sigma of the wide Gaussian
    pub wide_sigma: f64,
    /// Sigma of the baseline Gaussian applied to the raw input
    pub normalization_sigma: f64,
}

impl Default for DifferenceOfGaussiansTransformation {
    fn default() -> Self {
        Self {
            tophat_radius: DEFAULT_TOPHAT_RADIUS,
            narrow_sigma: DEFAULT_NARROW_SIGMA,
            wide_sigma: DEFAULT_WIDE_SIGMA,
            normalization_sigma: DEFAULT_NORMALIZATION_SIGMA,
        }
    }
}

impl DifferenceOfGaussiansTransformation {
    /// Create a transformation with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-hat ball radius
    pub fn with_tophat_radius(mut self, radius: usize) -> Self {
        self.tophat_radius = radius;
        self
    }

    /// Set the narrow sigma
    pub fn with_narrow_sigma(mut self, sigma: f64) -> Self {
        self.narrow_sigma = sigma;
        self
    }

    /// Set the wide sigma
    pub fn with_wide_sigma(mut self, sigma: f64) -> Self {
        self.wide_sigma = sigma;
        self
    }

    /// Set the normalization sigma
    pub fn with_normalization_sigma(mut self, sigma: f64) -> Self {
        self.normalization_sigma = sigma;
        self
    }

    /// Enhance a volume
    ///
    /// # Errors
    ///
    /// Returns a filter error for negative or NaN sigmas.
    pub fn apply(&self, volume: &Volume) -> DetectResult<Volume> {
        let ball = Sel3d::create_ball(self.tophat_radius);
        let tophat = top_hat_gray(volume, &ball)?;

        let narrow = gaussian_filter(&tophat, self.narrow_sigma)?;
        let wide = gaussian_filter(&tophat, self.wide_sigma)?;
        let baseline = gaussian_filter(volume, self.normalization_sigma)?;

        let mut enhanced = (narrow - wide) / baseline;
        z_score_in_place(&mut enhanced);
        debug!("dog transform: {:?} on {:?}", self, volume.dim());
        Ok(enhanced)
    }
}

/// Subtract the mean and divide by the population standard deviation
pub fn z_score_in_place(volume: &mut Volume) {
    let n = volume.len() as f64;
    let mean = volume.sum() / n;
    let var = volume.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std = var.sqrt();
    volume.mapv_inplace(|v| (v - mean) / std);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_defaults() {
        let t = DifferenceOfGaussiansTransformation::default();
        assert_eq!(t.tophat_radius, 2);
        assert_eq!(t.narrow_sigma, 0.8);
        assert_eq!(t.wide_sigma, 1.3);
        assert_eq!(t.normalization_sigma, 3.0);
        assert_eq!(t, DifferenceOfGaussiansTransformation::new());
    }

    #[test]
    fn test_builders() {
        let t = DifferenceOfGaussiansTransformation::new()
            .with_tophat_radius(3)
            .with_narrow_sigma(1.0)
            .with_wide_sigma(2.0)
            .with_normalization_sigma(5.0);
        assert_eq!(t.tophat_radius, 3);
        assert_eq!(t.narrow_sigma, 1.0);
        assert_eq!(t.wide_sigma, 2.0);
        assert_eq!(t.normalization_sigma, 5.0);
    }

    #[test]
    fn test_z_score() {
        let mut v = Array3::from_shape_vec((1, 1, 4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        z_score_in_place(&mut v);
        assert!(v.sum().abs() < 1e-12);
        let var = v.iter().map(|x| x * x).sum::<f64>() / 4.0;
        assert!((var - 1.0).abs() < 1e-12);
        assert!(v[[0, 0, 3]] > v[[0, 0, 0]]);
    }

    #[test]
    fn test_blob_is_brightest() {
        let mut vol = Array3::from_elem((9, 15, 15), 100.0);
        for z in 3..6 {
            for y in 6..9 {
                for x in 6..9 {
                    vol[[z, y, x]] = 400.0;
                }
            }
        }
        vol[[4, 7, 7]] = 800.0;
        let enhanced = DifferenceOfGaussiansTransformation::default()
            .apply(&vol)
            .unwrap();
        let (argmax, _) = enhanced
            .indexed_iter()
            .fold(((0, 0, 0), f64::NEG_INFINITY), |best, (p, &v)| {
                if v > best.1 { (p, v) } else { best }
            });
        assert_eq!(argmax, (4, 7, 7));
    }

    #[test]
    fn test_constant_volume_is_not_finite() {
        let vol = Array3::from_elem((5, 5, 5), 10.0);
        let enhanced = DifferenceOfGaussiansTransformation::default()
            .apply(&vol)
            .unwrap();
        assert!(enhanced.iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_negative_sigma_is_error() {
        let vol = Array3::from_elem((3, 3, 3), 1.0);
        let t = DifferenceOfGaussiansTransformation::default().with_wide_sigma(-1.0);
        assert!(t.apply(&vol).is_err());
    }
}

//! Correlation kernels
//!
//! Defines the 1D kernels applied along each axis by separable filters.
//!
//! API summary:
//! - `Kernel1d::from_slice` - arbitrary odd-length weights
//! - `Kernel1d::gaussian` - sampled, normalized Gaussian

use crate::{FilterError, FilterResult};

/// Gaussian kernels extend to this many standard deviations
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// A 1D correlation kernel centred on its middle element
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d {
    /// Half-width; the kernel has `2 * radius + 1` weights
    radius: usize,
    /// Weights, offset `-radius` first
    weights: Vec<f64>,
}

impl Kernel1d {
    /// Create a kernel from explicit weights.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` if `weights` is empty or has
    /// even length.
    pub fn from_slice(weights: &[f64]) -> FilterResult<Self> {
        if weights.is_empty() || weights.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                weights.len()
            )));
        }
        Ok(Self {
            radius: weights.len() / 2,
            weights: weights.to_vec(),
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// The kernel radius is `floor(truncate * sigma + 0.5)` and the weights
    /// `exp(-x^2 / (2 sigma^2))` are scaled to sum to one. A zero `sigma`
    /// yields the identity kernel.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameters` if `sigma` or `truncate` is
    /// negative or not finite.
    pub fn gaussian(sigma: f64, truncate: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "sigma must be finite and non-negative, got {sigma}"
            )));
        }
        if !truncate.is_finite() || truncate < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "truncate must be finite and non-negative, got {truncate}"
            )));
        }
        if sigma == 0.0 {
            return Self::from_slice(&[1.0]);
        }

        let radius = (truncate * sigma + 0.5) as usize;
        let denom = -0.5 / (sigma * sigma);
        let mut weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - radius as f64;
                (denom * x * x).exp()
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { radius, weights })
    }

    /// Half-width of the kernel
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of weights
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; kernels have at least one weight
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights, offset `-radius` first
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at a signed offset from the centre
    pub fn get(&self, offset: isize) -> Option<f64> {
        let idx = offset + self.radius as isize;
        if idx < 0 {
            return None;
        }
        self.weights.get(idx as usize).copied()
    }
}

//! spotfishing-filter - Smoothing filters for 3D volumes
//!
//! This crate provides the linear filters used by spot detection:
//!
//! - 1D correlation kernels, including sampled Gaussians
//! - Separable correlation of a volume along one axis
//! - Isotropic Gaussian smoothing of a volume
//!
//! All filters treat samples beyond the volume edge as copies of the
//! nearest edge sample.

pub mod convolve;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::{GAUSSIAN_TRUNCATE, Kernel1d};

pub use convolve::{correlate1d, gaussian_filter};

//! spotfishing - Spot detection in 3D microscopy volumes
//!
//! Finds small bright spots (for example FISH signals) in a z-stack and
//! reports one table row per spot with its centroid, size and mean
//! intensity.
//!
//! # Overview
//!
//! - Two detectors: difference-of-Gaussians enhancement or plain intensity
//!   thresholding, both followed by labeling and optional region growth
//! - Volume I/O for NumPy `.npy` and multi-page TIFF stacks
//! - The filters, morphology and region tools the detectors are built on
//!
//! # Example
//!
//! ```
//! use ndarray::Array3;
//! use spotfishing::{ImageData, detect_spots_int, get_centroid_from_record};
//!
//! let mut stack = Array3::<u16>::from_elem((5, 16, 16), 100);
//! for x in 6..9 {
//!     stack[[2, 8, x]] = 2000;
//! }
//!
//! let result = detect_spots_int(&ImageData::from(stack), 1000.0, None).unwrap();
//! assert_eq!(result.n_spots(), 1);
//!
//! let row = result.table().row(0).unwrap();
//! let center = get_centroid_from_record(&row).unwrap();
//! assert_eq!((center.z, center.y, center.x), (2.0, 8.0, 7.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use spotfishing_core::*;

// Detection entry points
pub use spotfishing_detect::{
    DetectError, DetectResult, DetectionResult, DifferenceOfGaussiansTransformation,
    detect_spots_dog, detect_spots_dog_with, detect_spots_int, get_centroid_from_record,
};

// Re-export building blocks as modules to avoid name conflicts
pub use spotfishing_detect as detect;
pub use spotfishing_filter as filter;
pub use spotfishing_io as io;
pub use spotfishing_morph as morph;
pub use spotfishing_region as region;

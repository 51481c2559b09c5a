//! spotfishing-detect - Spot detection in 3D microscopy volumes
//!
//! This crate finds bright punctate regions ("spots") in 3D intensity
//! images and measures them:
//!
//! - **Difference-of-Gaussians detection** - threshold an enhanced image
//! - **Intensity detection** - threshold raw intensity with small-object
//!   cleanup
//! - **Region measurement** - centroid, area and mean intensity per spot,
//!   with optional non-merging expansion of each spot
//! - **Record tools** - read a spot centroid back from a table row or map
//!
//! # Examples
//!
//! ```
//! use ndarray::Array3;
//! use spotfishing_core::ImageData;
//! use spotfishing_detect::{detect_spots_int, get_centroid_from_record};
//!
//! let mut stack = Array3::<u16>::zeros((5, 16, 16));
//! for x in 6..9 {
//!     stack[[2, 8, x]] = 1200;
//! }
//!
//! let result = detect_spots_int(&ImageData::from(stack), 500.0, None).unwrap();
//! assert_eq!(result.table().n_rows(), 1);
//!
//! let row = result.table().row(0).unwrap();
//! let center = get_centroid_from_record(&row).unwrap();
//! assert_eq!((center.z, center.y, center.x), (2.0, 8.0, 7.0));
//! ```

pub mod detectors;
pub mod dog_transform;
mod error;
pub mod props;
pub mod result;
pub mod roi_tools;

pub use error::{DetectError, DetectResult};

pub use detectors::{
    MIN_SPOT_SIZE, check_input_image, detect_spots_dog, detect_spots_dog_with, detect_spots_int,
};
pub use dog_transform::{
    DEFAULT_NARROW_SIGMA, DEFAULT_NORMALIZATION_SIGMA, DEFAULT_TOPHAT_RADIUS, DEFAULT_WIDE_SIGMA,
    DifferenceOfGaussiansTransformation,
};
pub use props::build_props_table;
pub use result::DetectionResult;
pub use roi_tools::get_centroid_from_record;

//! spotfishing-morph - Morphological operations on 3D volumes
//!
//! This crate provides grayscale morphology with flat structuring
//! elements:
//!
//! - Structuring elements ([`Sel3d`]): ball, cube, arbitrary masks
//! - Erosion and dilation (local minimum / maximum over the element)
//! - Opening and closing
//! - White and black top-hat transforms
//!
//! Volume borders are handled by mirror reflection, so an edge voxel sees
//! its own neighbourhood reflected rather than a constant pad.

mod error;
pub mod grayscale;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::Sel3d;

pub use grayscale::{
    bottom_hat_gray, close_gray, dilate_gray, erode_gray, open_gray, top_hat_gray,
};

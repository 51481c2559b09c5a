//! spotfishing-region - Region processing for 3D volumes
//!
//! This crate provides region processing functionality including:
//!
//! - **Connected component labeling** - 6, 18 or 26 connected regions
//! - **Seed fill operations** - Background flood fill and hole filling
//! - **Size selection** - Removing components below a voxel count
//! - **Distance transform** - Exact Euclidean distances with nearest-feature
//!   coordinates
//! - **Label expansion** - Growing regions without merging them
//! - **Region properties** - Area, centroid and mean intensity per region
//!
//! # Examples
//!
//! ## Labeling and measuring
//!
//! ```
//! use ndarray::Array3;
//! use spotfishing_region::{Connectivity, label_components, regionprops_table};
//!
//! let mut mask = Array3::from_elem((3, 8, 8), false);
//! mask[[1, 2, 2]] = true;
//! mask[[1, 2, 3]] = true;
//! mask[[1, 6, 6]] = true;
//!
//! let (labels, n) = label_components(&mask, Connectivity::Face).unwrap();
//! assert_eq!(n, 2);
//!
//! let intensity = mask.mapv(|m| if m { 10.0 } else { 0.0 });
//! let table = regionprops_table(&labels, &intensity).unwrap();
//! assert_eq!(table.n_rows(), 2);
//! assert_eq!(table.column("area"), Some(&[2.0, 1.0][..]));
//! ```
//!
//! ## Expanding labels
//!
//! ```
//! use ndarray::Array3;
//! use spotfishing_region::expand_labels;
//!
//! let mut labels = Array3::<u32>::zeros((5, 5, 5));
//! labels[[2, 2, 2]] = 1;
//! let grown = expand_labels(&labels, 1.0).unwrap();
//! assert_eq!(grown.iter().filter(|&&l| l == 1).count(), 7);
//! ```

pub mod conncomp;
pub mod distance;
pub mod error;
pub mod expand;
pub mod props;
pub mod seedfill;
pub mod select;

// Re-export core types
pub use spotfishing_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{Connectivity, component_sizes, count_labels, label_components};

// Re-export distance and expansion
pub use distance::{FeatureTransform, VoxelIndex, distance_transform_edt, feature_transform};
pub use expand::expand_labels;

// Re-export seedfill and selection
pub use seedfill::{fill_holes, flood_background};
pub use select::{remove_small_objects, select_by_size};

// Re-export measurement
pub use props::{RegionProps, regionprops, regionprops_table};

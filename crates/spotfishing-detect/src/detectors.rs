//! Spot detectors
//!
//! Two ways of turning a 3D intensity image into labeled spots:
//!
//! - [`detect_spots_dog`] thresholds a difference-of-Gaussians enhancement
//!   of the image and labels with face connectivity.
//! - [`detect_spots_int`] thresholds raw intensity, fills enclosed holes,
//!   labels with full connectivity and drops tiny components.
//!
//! Both finish with [`build_props_table`], so their tables share one
//! schema.

use crate::dog_transform::DifferenceOfGaussiansTransformation;
use crate::error::{DetectError, DetectResult};
use crate::props::build_props_table;
use crate::result::DetectionResult;
use log::debug;
use spotfishing_core::{ImageData, Volume};
use spotfishing_region::{Connectivity, fill_holes, label_components, remove_small_objects};

/// Components smaller than this are dropped by intensity detection
pub const MIN_SPOT_SIZE: usize = 5;

/// Required dimensionality of detector input
const REQUIRED_NDIM: usize = 3;

/// Validate detector input and convert it to a working volume
///
/// # Errors
///
/// Returns `DetectError::TypeMismatch` for masks and colour images, and
/// `DetectError::Dimensionality` unless the image is 3D.
pub fn check_input_image(image: &ImageData) -> DetectResult<Volume> {
    let kind = image.kind();
    if !kind.is_intensity() {
        return Err(DetectError::TypeMismatch {
            expected: "numeric intensity",
            actual: kind,
        });
    }
    if image.ndim() != REQUIRED_NDIM {
        return Err(DetectError::Dimensionality {
            expected: REQUIRED_NDIM,
            actual: image.ndim(),
        });
    }
    image.to_volume().ok_or(DetectError::Dimensionality {
        expected: REQUIRED_NDIM,
        actual: image.ndim(),
    })
}

/// Detect spots by difference-of-Gaussians filtering
///
/// Uses the default [`DifferenceOfGaussiansTransformation`].
///
/// # Arguments
///
/// * `input_image` - 3D image in which to detect spots
/// * `spot_threshold` - Minimum enhanced value for a voxel to belong to a
///   spot
/// * `expand_px` - Distance by which to grow each spot, up to the point of
///   touching a neighbouring spot; `None` or zero for no growth
///
/// # Returns
///
/// The spot table, the enhanced image and the spot labels. Spots are
/// measured against the enhanced image.
pub fn detect_spots_dog(
    input_image: &ImageData,
    spot_threshold: f64,
    expand_px: Option<f64>,
) -> DetectResult<DetectionResult> {
    detect_spots_dog_with(
        &DifferenceOfGaussiansTransformation::default(),
        input_image,
        spot_threshold,
        expand_px,
    )
}

/// Detect spots by difference-of-Gaussians filtering with custom parameters
pub fn detect_spots_dog_with(
    transform: &DifferenceOfGaussiansTransformation,
    input_image: &ImageData,
    spot_threshold: f64,
    expand_px: Option<f64>,
) -> DetectResult<DetectionResult> {
    let volume = check_input_image(input_image)?;
    let enhanced = transform.apply(&volume)?;

    let mask = enhanced.mapv(|v| v > spot_threshold);
    let (labels, n) = label_components(&mask, Connectivity::Face)?;
    debug!("detect_spots_dog: {n} regions above {spot_threshold}");

    let (table, labels) = build_props_table(labels, &enhanced, expand_px)?;
    Ok(DetectionResult::new(
        table,
        ImageData::F64(enhanced.into_dyn()),
        labels,
    ))
}

/// Detect spots by intensity thresholding
///
/// Voxels brighter than `spot_threshold` are foreground. Enclosed holes are
/// filled and components are labeled with full (26-neighbour)
/// connectivity. When more than one component is found, those smaller than
/// [`MIN_SPOT_SIZE`] voxels are dropped; a single component is always kept.
///
/// # Returns
///
/// The spot table, the unchanged input image and the spot labels. Spots
/// are measured against the input image.
pub fn detect_spots_int(
    input_image: &ImageData,
    spot_threshold: f64,
    expand_px: Option<f64>,
) -> DetectResult<DetectionResult> {
    let volume = check_input_image(input_image)?;

    let mask = fill_holes(
        &volume.mapv(|v| v > spot_threshold),
        Connectivity::Face,
    );
    let (mut labels, n) = label_components(&mask, Connectivity::Full)?;
    debug!("detect_spots_int: {n} regions above {spot_threshold}");
    if n > 1 {
        labels = remove_small_objects(&labels, MIN_SPOT_SIZE);
    }

    let (table, labels) = build_props_table(labels, &volume, expand_px)?;
    Ok(DetectionResult::new(table, input_image.clone(), labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, Array4};
    use spotfishing_core::{DETECTION_TABLE_COLUMNS, PixelKind};

    #[test]
    fn test_check_rejects_wrong_dims() {
        for image in [
            ImageData::from(Array2::<u16>::zeros((4, 4)).into_dyn()),
            ImageData::from(Array4::<u16>::zeros((2, 2, 2, 2)).into_dyn()),
        ] {
            assert!(matches!(
                check_input_image(&image),
                Err(DetectError::Dimensionality { expected: 3, .. })
            ));
        }
    }

    #[test]
    fn test_check_rejects_non_intensity() {
        let mask = ImageData::from(Array3::from_elem((2, 2, 2), true));
        assert!(matches!(
            check_input_image(&mask),
            Err(DetectError::TypeMismatch {
                actual: PixelKind::Bool,
                ..
            })
        ));
    }

    #[test]
    fn test_int_single_small_region_survives() {
        let mut stack = Array3::<u16>::zeros((4, 6, 6));
        stack[[1, 2, 2]] = 1000;
        stack[[1, 2, 3]] = 1000;
        let result = detect_spots_int(&ImageData::from(stack), 500.0, None).unwrap();
        assert_eq!(result.n_spots(), 1);
        assert_eq!(result.table().column("area"), Some(&[2.0][..]));
    }

    #[test]
    fn test_int_small_regions_removed_when_many() {
        let mut stack = Array3::<u16>::zeros((6, 10, 10));
        stack[[1, 1, 1]] = 1000;
        for z in 2..4 {
            for y in 5..8 {
                stack[[z, y, 6]] = 1000;
            }
        }
        let result = detect_spots_int(&ImageData::from(stack), 500.0, None).unwrap();
        assert_eq!(result.n_spots(), 1);
        assert_eq!(result.table().column("area"), Some(&[6.0][..]));
        assert_eq!(result.labels()[[1, 1, 1]], 0);
    }

    #[test]
    fn test_int_fills_holes() {
        let mut stack = Array3::<f32>::zeros((5, 5, 5));
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    stack[[z, y, x]] = 10.0;
                }
            }
        }
        stack[[2, 2, 2]] = 0.0;
        let result = detect_spots_int(&ImageData::from(stack), 5.0, None).unwrap();
        assert_eq!(result.table().column("area"), Some(&[27.0][..]));
        assert_eq!(result.table().column("intensity_mean"), Some(&[260.0 / 27.0][..]));
    }

    #[test]
    fn test_int_image_is_input() {
        let stack = Array3::<u8>::from_elem((2, 3, 3), 7);
        let image = ImageData::from(stack);
        let result = detect_spots_int(&image, 100.0, Some(2.0)).unwrap();
        assert_eq!(result.image(), &image);
        assert!(result.table().is_empty());
        assert_eq!(result.table().column_names(), DETECTION_TABLE_COLUMNS);
    }

    #[test]
    fn test_dog_image_is_enhanced() {
        let stack = Array3::<u16>::from_elem((4, 8, 8), 100);
        let result = detect_spots_dog(&ImageData::from(stack), 1.0, None).unwrap();
        assert_eq!(result.image().kind(), PixelKind::F64);
        assert_eq!(result.image().shape(), &[4, 8, 8]);
        assert!(result.table().is_empty());
        assert_eq!(result.table().column_names(), DETECTION_TABLE_COLUMNS);
    }

    #[test]
    fn test_dog_errors_before_processing() {
        let image = ImageData::from(Array2::<f64>::zeros((8, 8)).into_dyn());
        assert!(matches!(
            detect_spots_dog(&image, 0.0, None),
            Err(DetectError::Dimensionality { actual: 2, .. })
        ));
    }
}

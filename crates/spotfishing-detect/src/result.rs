//! Detection result

use spotfishing_core::{ImageData, LabelMap, Table};

/// Regions found by a detector, with the image and labels they came from
///
/// The table has one row per region with the columns `zc`, `yc`, `xc`,
/// `area` and `intensity_mean`. The image is the one thresholded by the
/// detector: the enhanced volume for difference-of-Gaussians detection,
/// the raw input for intensity detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    table: Table,
    image: ImageData,
    labels: LabelMap,
}

impl DetectionResult {
    /// Bundle a detection result
    pub fn new(table: Table, image: ImageData, labels: LabelMap) -> Self {
        Self {
            table,
            image,
            labels,
        }
    }

    /// Per-region measurements
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Image used for detection
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Region labels, same shape as the image
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Number of detected regions
    pub fn n_spots(&self) -> usize {
        self.table.n_rows()
    }

    /// Take the parts out of the result
    pub fn into_parts(self) -> (Table, ImageData, LabelMap) {
        (self.table, self.image, self.labels)
    }
}

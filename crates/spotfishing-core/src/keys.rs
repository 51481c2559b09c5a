//! Column keys for region tables
//!
//! The canonical names under which region measurements are reported, and
//! the raw names produced by region measurement before they are renamed.

/// Raw column holding the region's label id
pub const ROI_LABEL_KEY: &str = "label";

/// Raw column prefix for centroid coordinates (`centroid-0`, ...)
pub const ROI_CENTROID_KEY: &str = "centroid";

/// Column holding the voxel count of a region
pub const ROI_AREA_KEY: &str = "area";

/// Column holding the mean intensity over a region
pub const ROI_MEAN_INTENSITY_KEY: &str = "intensity_mean";

/// Measurements taken per region besides label and centroid
pub const ROI_MEASUREMENT_KEYS: [&str; 2] = [ROI_AREA_KEY, ROI_MEAN_INTENSITY_KEY];

/// Raw centroid column names, one per axis in (z, y, x) order
pub const RAW_CENTROID_COLUMNS: [&str; 3] = ["centroid-0", "centroid-1", "centroid-2"];

/// Full raw schema of a 3D measurement table
pub const REGIONPROPS_TABLE_COLUMNS_EXPANDED: [&str; 6] = [
    ROI_LABEL_KEY,
    RAW_CENTROID_COLUMNS[0],
    RAW_CENTROID_COLUMNS[1],
    RAW_CENTROID_COLUMNS[2],
    ROI_AREA_KEY,
    ROI_MEAN_INTENSITY_KEY,
];

/// Renaming from raw centroid columns to canonical center keys
pub const ROI_CENTROID_COLUMN_RENAMING: [(&str, &str); 3] = [
    (RAW_CENTROID_COLUMNS[0], RoiCenterKeys::Z.key()),
    (RAW_CENTROID_COLUMNS[1], RoiCenterKeys::Y.key()),
    (RAW_CENTROID_COLUMNS[2], RoiCenterKeys::X.key()),
];

/// Columns of a finished detection table, in order
pub const DETECTION_TABLE_COLUMNS: [&str; 5] = [
    RoiCenterKeys::Z.key(),
    RoiCenterKeys::Y.key(),
    RoiCenterKeys::X.key(),
    ROI_AREA_KEY,
    ROI_MEAN_INTENSITY_KEY,
];

/// Keys under which a region's center coordinates are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoiCenterKeys {
    Z,
    Y,
    X,
}

impl RoiCenterKeys {
    /// All keys in (z, y, x) order
    pub const ALL: [RoiCenterKeys; 3] = [RoiCenterKeys::Z, RoiCenterKeys::Y, RoiCenterKeys::X];

    /// Column name for this axis
    pub const fn key(self) -> &'static str {
        match self {
            RoiCenterKeys::Z => "zc",
            RoiCenterKeys::Y => "yc",
            RoiCenterKeys::X => "xc",
        }
    }
}

impl std::fmt::Display for RoiCenterKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_keys() {
        let keys: Vec<&str> = RoiCenterKeys::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys, ["zc", "yc", "xc"]);
    }

    #[test]
    fn test_detection_columns_follow_renaming() {
        for (i, (raw, renamed)) in ROI_CENTROID_COLUMN_RENAMING.iter().enumerate() {
            assert_eq!(*raw, RAW_CENTROID_COLUMNS[i]);
            assert_eq!(*renamed, DETECTION_TABLE_COLUMNS[i]);
        }
        assert_eq!(&DETECTION_TABLE_COLUMNS[3..], &ROI_MEASUREMENT_KEYS);
    }
}

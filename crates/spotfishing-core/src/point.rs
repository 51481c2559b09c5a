//! ImagePoint3D - A point in 3D image space

/// A point in a 3D image, in (z, y, x) order
///
/// Coordinates are in voxel units and may be fractional, as produced by
/// centroid measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint3D {
    /// Depth (slice) coordinate
    pub z: f64,
    /// Row coordinate
    pub y: f64,
    /// Column coordinate
    pub x: f64,
}

impl ImagePoint3D {
    /// Create a new point
    pub fn new(z: f64, y: f64, x: f64) -> Self {
        Self { z, y, x }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &ImagePoint3D) -> f64 {
        let dz = self.z - other.z;
        let dy = self.y - other.y;
        let dx = self.x - other.x;
        (dz * dz + dy * dy + dx * dx).sqrt()
    }
}

impl From<[f64; 3]> for ImagePoint3D {
    fn from([z, y, x]: [f64; 3]) -> Self {
        Self { z, y, x }
    }
}

impl From<ImagePoint3D> for [f64; 3] {
    fn from(p: ImagePoint3D) -> Self {
        [p.z, p.y, p.x]
    }
}

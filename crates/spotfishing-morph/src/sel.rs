//! Structuring Element (SEL) for 3D morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Elements here are flat: each position is either part of the
//! neighborhood (a hit) or not.

use crate::{MorphError, MorphResult};
use ndarray::Array3;

/// 3D structuring element
///
/// The origin (cz, cy, cx) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel3d {
    hits: Array3<bool>,
    origin: [usize; 3],
    name: Option<String>,
}

impl Sel3d {
    /// Create a structuring element from a mask, centred on the middle
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidSel` if any extent is even or zero, or
    /// the mask has no hits.
    pub fn from_mask(hits: Array3<bool>) -> MorphResult<Self> {
        let (d, h, w) = hits.dim();
        if [d, h, w].iter().any(|&n| n == 0 || n % 2 == 0) {
            return Err(MorphError::InvalidSel(format!(
                "extents must be odd and non-zero, got {d}x{h}x{w}"
            )));
        }
        if !hits.iter().any(|&hit| hit) {
            return Err(MorphError::InvalidSel("no hit elements".to_string()));
        }
        Ok(Self {
            hits,
            origin: [d / 2, h / 2, w / 2],
            name: None,
        })
    }

    /// Create a ball: all positions within Euclidean `radius` of the centre
    ///
    /// The element is `(2r + 1)^3` and includes the boundary
    /// (`dz^2 + dy^2 + dx^2 <= r^2`). A radius of zero is the single voxel.
    pub fn create_ball(radius: usize) -> Self {
        let n = 2 * radius + 1;
        let r = radius as isize;
        let r2 = r * r;
        let hits = Array3::from_shape_fn((n, n, n), |(z, y, x)| {
            let dz = z as isize - r;
            let dy = y as isize - r;
            let dx = x as isize - r;
            dz * dz + dy * dy + dx * dx <= r2
        });
        Self {
            hits,
            origin: [radius, radius, radius],
            name: Some(format!("ball{radius}")),
        }
    }

    /// Create a cube with all hits
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidSel` if `size` is even or zero.
    pub fn create_cube(size: usize) -> MorphResult<Self> {
        let mut sel = Self::from_mask(Array3::from_elem((size, size, size), true))?;
        sel.name = Some(format!("cube{size}"));
        Ok(sel)
    }

    /// Extents as (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.hits.dim()
    }

    /// Origin as (cz, cy, cx)
    pub fn origin(&self) -> [usize; 3] {
        self.origin
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Whether the element at (z, y, x) is a hit
    pub fn is_hit(&self, z: usize, y: usize, x: usize) -> bool {
        self.hits.get((z, y, x)).copied().unwrap_or(false)
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&hit| hit).count()
    }

    /// Hit positions relative to the origin, in raster order
    pub fn hit_offsets(&self) -> Vec<[isize; 3]> {
        let [cz, cy, cx] = self.origin.map(|c| c as isize);
        self.hits
            .indexed_iter()
            .filter(|(_, hit)| **hit)
            .map(|((z, y, x), _)| [z as isize - cz, y as isize - cy, x as isize - cx])
            .collect()
    }

    /// Create the reflected (point-mirrored through the origin) SEL
    pub fn reflect(&self) -> Self {
        let (d, h, w) = self.hits.dim();
        let hits = Array3::from_shape_fn((d, h, w), |(z, y, x)| {
            self.hits[[d - 1 - z, h - 1 - y, w - 1 - x]]
        });
        let [cz, cy, cx] = self.origin;
        Self {
            hits,
            origin: [d - 1 - cz, h - 1 - cy, w - 1 - cx],
            name: self.name.clone(),
        }
    }
}

//! ImageData - Dynamically typed N-dimensional image
//!
//! Microscopy stacks arrive with whatever element type the acquisition or
//! the file on disk used. `ImageData` keeps that element type at runtime so
//! callers can hand any loaded array to the detectors, which then decide
//! whether the element kind and dimensionality are acceptable.
//!
//! All numeric primitives work on [`Volume`], a 3D `f64` array in
//! (z, y, x) order. Intensity kinds convert to it losslessly.
//!
//! # Examples
//!
//! ```
//! use ndarray::Array3;
//! use spotfishing_core::{ImageData, PixelKind};
//!
//! let stack = Array3::<u16>::zeros((4, 8, 8));
//! let image = ImageData::from(stack);
//! assert_eq!(image.kind(), PixelKind::U16);
//! assert_eq!(image.ndim(), 3);
//! assert!(image.to_volume().is_some());
//! ```

use ndarray::{Array3, ArrayD, Ix3};

/// Floating-point 3D working image, axes (z, y, x)
pub type Volume = Array3<f64>;

/// Integer region labels, 0 is background
pub type LabelMap = Array3<u32>;

/// Runtime element kind of an [`ImageData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelKind {
    U8,
    U16,
    U32,
    I16,
    I32,
    F32,
    F64,
    /// Binary mask
    Bool,
    /// Interleaved 8-bit colour
    Rgb8,
}

impl PixelKind {
    /// Short name in NumPy dtype spelling
    pub fn name(self) -> &'static str {
        match self {
            PixelKind::U8 => "uint8",
            PixelKind::U16 => "uint16",
            PixelKind::U32 => "uint32",
            PixelKind::I16 => "int16",
            PixelKind::I32 => "int32",
            PixelKind::F32 => "float32",
            PixelKind::F64 => "float64",
            PixelKind::Bool => "bool",
            PixelKind::Rgb8 => "rgb8",
        }
    }

    /// Whether values of this kind are scalar intensities
    pub fn is_intensity(self) -> bool {
        !matches!(self, PixelKind::Bool | PixelKind::Rgb8)
    }
}

impl std::fmt::Display for PixelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// N-dimensional image with a runtime element kind
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    Bool(ArrayD<bool>),
    Rgb8(ArrayD<[u8; 3]>),
}

impl ImageData {
    /// Element kind
    pub fn kind(&self) -> PixelKind {
        match self {
            ImageData::U8(_) => PixelKind::U8,
            ImageData::U16(_) => PixelKind::U16,
            ImageData::U32(_) => PixelKind::U32,
            ImageData::I16(_) => PixelKind::I16,
            ImageData::I32(_) => PixelKind::I32,
            ImageData::F32(_) => PixelKind::F32,
            ImageData::F64(_) => PixelKind::F64,
            ImageData::Bool(_) => PixelKind::Bool,
            ImageData::Rgb8(_) => PixelKind::Rgb8,
        }
    }

    /// Array shape, slowest axis first
    pub fn shape(&self) -> &[usize] {
        match self {
            ImageData::U8(a) => a.shape(),
            ImageData::U16(a) => a.shape(),
            ImageData::U32(a) => a.shape(),
            ImageData::I16(a) => a.shape(),
            ImageData::I32(a) => a.shape(),
            ImageData::F32(a) => a.shape(),
            ImageData::F64(a) => a.shape(),
            ImageData::Bool(a) => a.shape(),
            ImageData::Rgb8(a) => a.shape(),
        }
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the image has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert intensity data to `f64`, keeping the dimensionality
    ///
    /// Returns `None` for non-intensity kinds.
    pub fn to_f64(&self) -> Option<ArrayD<f64>> {
        let converted = match self {
            ImageData::U8(a) => a.mapv(f64::from),
            ImageData::U16(a) => a.mapv(f64::from),
            ImageData::U32(a) => a.mapv(f64::from),
            ImageData::I16(a) => a.mapv(f64::from),
            ImageData::I32(a) => a.mapv(f64::from),
            ImageData::F32(a) => a.mapv(f64::from),
            ImageData::F64(a) => a.clone(),
            ImageData::Bool(_) | ImageData::Rgb8(_) => return None,
        };
        Some(converted)
    }

    /// Convert to a 3D `f64` working volume
    ///
    /// Returns `None` unless the image holds intensities in exactly three
    /// dimensions.
    pub fn to_volume(&self) -> Option<Volume> {
        if self.ndim() != 3 {
            return None;
        }
        self.to_f64()?.into_dimensionality::<Ix3>().ok()
    }
}

macro_rules! impl_from_array {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$t>> for ImageData {
                fn from(a: ArrayD<$t>) -> Self {
                    ImageData::$variant(a)
                }
            }

            impl From<Array3<$t>> for ImageData {
                fn from(a: Array3<$t>) -> Self {
                    ImageData::$variant(a.into_dyn())
                }
            }
        )*
    };
}

impl_from_array!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    [u8; 3] => Rgb8,
);

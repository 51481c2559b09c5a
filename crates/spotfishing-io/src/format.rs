//! Stack format detection
//!
//! Detects volume file formats by examining magic numbers in the file
//! header, with the file extension as the fallback for writing.

use crate::npy::NPY_MAGIC;
use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for TIFF detection
mod magic {
    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// BigTIFF little-endian: II 2B 00
    pub const BIGTIFF_LE: &[u8] = &[0x49, 0x49, 0x2B, 0x00];

    /// BigTIFF big-endian: MM 00 2B
    pub const BIGTIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2B];
}

/// File formats that hold a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackFormat {
    /// NumPy `.npy`
    Npy,
    /// Multi-page TIFF
    Tiff,
}

impl StackFormat {
    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            StackFormat::Npy => "npy",
            StackFormat::Tiff => "tif",
        }
    }

    /// Format implied by a path's extension
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "npy" => Some(StackFormat::Npy),
            "tif" | "tiff" => Some(StackFormat::Tiff),
            _ => None,
        }
    }
}

/// Detect the format of a file from its header
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<StackFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect the format from leading bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<StackFormat> {
    if data.len() < 4 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(NPY_MAGIC) {
        return Ok(StackFormat::Npy);
    }

    if [
        magic::TIFF_LE,
        magic::TIFF_BE,
        magic::BIGTIFF_LE,
        magic::BIGTIFF_BE,
    ]
    .iter()
    .any(|m| data.starts_with(m))
    {
        return Ok(StackFormat::Tiff);
    }

    Err(IoError::UnsupportedFormat(
        "unknown stack format".to_string(),
    ))
}

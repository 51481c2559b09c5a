//! spotfishing-io - Volume I/O for spotfishing
//!
//! Loads and stores 3D intensity stacks as [`ImageData`]:
//!
//! - **NumPy** `.npy` files (versions 1.0 to 3.0, C order)
//! - **Multi-page TIFF** files, one page per z slice
//!
//! [`read_stack`] picks the reader from the file's magic bytes.
//!
//! # Examples
//!
//! ```no_run
//! use spotfishing_io::read_stack;
//!
//! let image = read_stack("tests/data/inputs/spots_small.npy").unwrap();
//! assert_eq!(image.ndim(), 3);
//! ```

mod error;
pub mod format;
pub mod npy;
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{StackFormat, detect_format, detect_format_from_bytes};
pub use npy::{read_npy, read_npy_from, write_npy, write_npy_to};
pub use tiff::{read_tiff_stack, write_tiff_stack};

use log::debug;
use spotfishing_core::ImageData;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a volume, detecting the format from the file contents
pub fn read_stack<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("read_stack: {} as {:?}", path.display(), format);
    match format {
        StackFormat::Npy => read_npy(path),
        StackFormat::Tiff => read_tiff_stack(BufReader::new(File::open(path)?)),
    }
}

/// Write a volume in the format implied by the path's extension
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` if the extension is not a known
/// stack format.
pub fn write_stack<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    let format = StackFormat::from_extension(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("no stack format for {}", path.display()))
    })?;
    match format {
        StackFormat::Npy => write_npy(path, image),
        StackFormat::Tiff => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_tiff_stack(image, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
    }
}

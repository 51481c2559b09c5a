//! NumPy `.npy` format support
//!
//! Reads and writes single arrays in the NumPy binary format, versions 1.0,
//! 2.0 and 3.0. Only C-ordered arrays of the element types listed in
//! [`ImageData`] are supported; colour data has no `.npy` representation
//! here.
//!
//! # File layout
//!
//! ```text
//! \x93NUMPY <major> <minor> <header_len> <header> <data>
//! ```
//!
//! The header is a Python dict literal such as
//! `{'descr': '<u2', 'fortran_order': False, 'shape': (4, 64, 64), }`
//! padded with spaces and terminated by a newline.

use crate::{IoError, IoResult};
use log::trace;
use ndarray::{ArrayD, IxDyn};
use spotfishing_core::{ImageData, PixelKind};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic string at the start of every `.npy` file
pub const NPY_MAGIC: &[u8] = b"\x93NUMPY";

/// Header alignment used when writing
const HEADER_ALIGN: usize = 64;

/// Byte order of stored elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

/// Parsed `.npy` header
#[derive(Debug, Clone, PartialEq)]
struct NpyHeader {
    kind: PixelKind,
    order: ByteOrder,
    shape: Vec<usize>,
}

/// Read a `.npy` file
pub fn read_npy<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path)?;
    read_npy_from(BufReader::new(file))
}

/// Read a `.npy` array from any reader
///
/// # Errors
///
/// Returns `IoError::InvalidData` for malformed files and
/// `IoError::UnsupportedFormat` for Fortran-ordered arrays or element types
/// without an [`ImageData`] counterpart.
pub fn read_npy_from<R: Read>(mut reader: R) -> IoResult<ImageData> {
    let mut preamble = [0u8; 8];
    reader.read_exact(&mut preamble)?;
    if &preamble[..6] != NPY_MAGIC {
        return Err(IoError::InvalidData("missing NumPy magic string".to_string()));
    }

    let header_len = match preamble[6] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        major => {
            return Err(IoError::UnsupportedFormat(format!(
                "npy version {major}.{}",
                preamble[7]
            )));
        }
    };

    let mut header_bytes = vec![0u8; header_len];
    reader.read_exact(&mut header_bytes)?;
    let header_text = String::from_utf8(header_bytes)
        .map_err(|_| IoError::InvalidData("npy header is not valid text".to_string()))?;
    let header = parse_header(&header_text)?;
    trace!("read_npy: {:?}", header);

    let count: usize = header.shape.iter().product();
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let needed = count * element_size(header.kind);
    if data.len() < needed {
        return Err(IoError::InvalidData(format!(
            "npy data has {} bytes, expected {needed}",
            data.len()
        )));
    }
    decode_elements(&data[..needed], &header)
}

/// Write an array as a version 1.0 `.npy` file
pub fn write_npy<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_npy_to(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Write an array in `.npy` format to any writer
///
/// Elements are written little-endian in C order.
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for colour images.
pub fn write_npy_to<W: Write>(mut writer: W, image: &ImageData) -> IoResult<()> {
    let descr = descr_for(image.kind())?;
    let shape = match image.shape() {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        dims => format!(
            "({})",
            dims.iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    let mut header = format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': {shape}, }}");
    // Preamble is 10 bytes; total header must end on an aligned boundary
    let unpadded = NPY_MAGIC.len() + 4 + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let header_len = u16::try_from(header.len())
        .map_err(|_| IoError::EncodeError("npy header too long for version 1.0".to_string()))?;

    writer.write_all(NPY_MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;
    writer.write_all(&encode_elements(image))?;
    Ok(())
}

fn descr_for(kind: PixelKind) -> IoResult<&'static str> {
    Ok(match kind {
        PixelKind::U8 => "|u1",
        PixelKind::U16 => "<u2",
        PixelKind::U32 => "<u4",
        PixelKind::I16 => "<i2",
        PixelKind::I32 => "<i4",
        PixelKind::F32 => "<f4",
        PixelKind::F64 => "<f8",
        PixelKind::Bool => "|b1",
        PixelKind::Rgb8 => {
            return Err(IoError::UnsupportedFormat(
                "colour images cannot be written as npy".to_string(),
            ));
        }
    })
}

fn element_size(kind: PixelKind) -> usize {
    match kind {
        PixelKind::U8 | PixelKind::Bool => 1,
        PixelKind::U16 | PixelKind::I16 => 2,
        PixelKind::U32 | PixelKind::I32 | PixelKind::F32 => 4,
        PixelKind::F64 => 8,
        PixelKind::Rgb8 => 3,
    }
}

/// Extract the value text following `'key':` in a header dict
fn header_value<'a>(header: &'a str, key: &str) -> IoResult<&'a str> {
    let pattern = format!("'{key}':");
    let start = header
        .find(&pattern)
        .map(|i| i + pattern.len())
        .ok_or_else(|| IoError::InvalidData(format!("npy header has no '{key}'")))?;
    Ok(header[start..].trim_start())
}

fn parse_header(header: &str) -> IoResult<NpyHeader> {
    let descr_text = header_value(header, "descr")?;
    let descr = descr_text
        .strip_prefix('\'')
        .and_then(|s| s.split('\'').next())
        .ok_or_else(|| IoError::InvalidData("malformed npy descr".to_string()))?;
    let (order, kind) = parse_descr(descr)?;

    if header_value(header, "fortran_order")?.starts_with("True") {
        return Err(IoError::UnsupportedFormat(
            "Fortran-ordered npy arrays".to_string(),
        ));
    }

    let shape_text = header_value(header, "shape")?;
    let inner = shape_text
        .strip_prefix('(')
        .and_then(|s| s.split(')').next())
        .ok_or_else(|| IoError::InvalidData("malformed npy shape".to_string()))?;
    let shape = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| IoError::InvalidData(format!("bad npy dimension '{s}'")))
        })
        .collect::<IoResult<Vec<_>>>()?;

    Ok(NpyHeader { kind, order, shape })
}

fn parse_descr(descr: &str) -> IoResult<(ByteOrder, PixelKind)> {
    let mut chars = descr.chars();
    let order = match chars.next() {
        Some('<') | Some('|') => ByteOrder::Little,
        Some('>') => ByteOrder::Big,
        Some('=') if cfg!(target_endian = "big") => ByteOrder::Big,
        Some('=') => ByteOrder::Little,
        _ => {
            return Err(IoError::InvalidData(format!("malformed npy descr '{descr}'")));
        }
    };
    let kind = match chars.as_str() {
        "u1" => PixelKind::U8,
        "u2" => PixelKind::U16,
        "u4" => PixelKind::U32,
        "i2" => PixelKind::I16,
        "i4" => PixelKind::I32,
        "f4" => PixelKind::F32,
        "f8" => PixelKind::F64,
        "b1" => PixelKind::Bool,
        other => {
            return Err(IoError::UnsupportedFormat(format!("npy dtype '{other}'")));
        }
    };
    Ok((order, kind))
}

macro_rules! decode_as {
    ($t:ty, $data:expr, $order:expr) => {
        $data
            .chunks_exact(std::mem::size_of::<$t>())
            .map(|c| {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(c);
                match $order {
                    ByteOrder::Little => <$t>::from_le_bytes(bytes),
                    ByteOrder::Big => <$t>::from_be_bytes(bytes),
                }
            })
            .collect::<Vec<$t>>()
    };
}

fn decode_elements(data: &[u8], header: &NpyHeader) -> IoResult<ImageData> {
    let dim = IxDyn(&header.shape);
    let order = header.order;
    Ok(match header.kind {
        PixelKind::U8 => ImageData::U8(ArrayD::from_shape_vec(dim, data.to_vec())?),
        PixelKind::Bool => {
            ImageData::Bool(ArrayD::from_shape_vec(dim, data.iter().map(|&b| b != 0).collect())?)
        }
        PixelKind::U16 => ImageData::U16(ArrayD::from_shape_vec(dim, decode_as!(u16, data, order))?),
        PixelKind::U32 => ImageData::U32(ArrayD::from_shape_vec(dim, decode_as!(u32, data, order))?),
        PixelKind::I16 => ImageData::I16(ArrayD::from_shape_vec(dim, decode_as!(i16, data, order))?),
        PixelKind::I32 => ImageData::I32(ArrayD::from_shape_vec(dim, decode_as!(i32, data, order))?),
        PixelKind::F32 => ImageData::F32(ArrayD::from_shape_vec(dim, decode_as!(f32, data, order))?),
        PixelKind::F64 => ImageData::F64(ArrayD::from_shape_vec(dim, decode_as!(f64, data, order))?),
        PixelKind::Rgb8 => {
            return Err(IoError::UnsupportedFormat("npy colour data".to_string()));
        }
    })
}

fn encode_elements(image: &ImageData) -> Vec<u8> {
    match image {
        ImageData::U8(a) => a.iter().copied().collect(),
        ImageData::Bool(a) => a.iter().map(|&b| u8::from(b)).collect(),
        ImageData::U16(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::U32(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::I16(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::I32(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::F32(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::F64(a) => a.iter().flat_map(|v| v.to_le_bytes()).collect(),
        ImageData::Rgb8(a) => a.iter().flatten().copied().collect(),
    }
}

//! Multi-page TIFF stack support
//!
//! A z-stack is stored one slice per TIFF page. Reading concatenates the
//! pages into a 3D array with axes (page, row, column); writing emits one
//! page per z slice.

use crate::{IoError, IoResult};
use log::debug;
use ndarray::{ArrayD, Axis, IxDyn};
use spotfishing_core::ImageData;
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::{Gray8, Gray16, Gray32Float};

/// Samples of one decoded page
enum PageData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Rgb8(Vec<[u8; 3]>),
}

/// Decode the page at the current decoder position
fn decode_page<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<((u32, u32), PageData)> {
    let dims = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let page = match (color_type, image_data) {
        (ColorType::Gray(_), DecodingResult::U8(d)) => PageData::U8(d),
        (ColorType::Gray(_), DecodingResult::U16(d)) => PageData::U16(d),
        (ColorType::Gray(_), DecodingResult::U32(d)) => PageData::U32(d),
        (ColorType::Gray(_), DecodingResult::I16(d)) => PageData::I16(d),
        (ColorType::Gray(_), DecodingResult::I32(d)) => PageData::I32(d),
        (ColorType::Gray(_), DecodingResult::F32(d)) => PageData::F32(d),
        (ColorType::Gray(_), DecodingResult::F64(d)) => PageData::F64(d),
        (ColorType::RGB(8), DecodingResult::U8(d)) => {
            PageData::Rgb8(d.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
        }
        (color_type, _) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                color_type
            )));
        }
    };
    Ok((dims, page))
}

macro_rules! stack_pages {
    ($variant:ident, $pages:expr, $shape:expr) => {{
        let mut all = Vec::new();
        for page in $pages {
            match page {
                PageData::$variant(v) => all.extend(v),
                _ => {
                    return Err(IoError::InvalidData(
                        "TIFF pages differ in sample type".to_string(),
                    ));
                }
            }
        }
        ImageData::$variant(ArrayD::from_shape_vec(IxDyn(&$shape), all)?)
    }};
}

/// Read every page of a TIFF file as one z-stack
///
/// # Errors
///
/// Returns `IoError::InvalidData` if pages differ in size or sample type,
/// and `IoError::UnsupportedFormat` for colour types other than gray and
/// 8-bit RGB.
pub fn read_tiff_stack<R: Read + Seek>(reader: R) -> IoResult<ImageData> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let mut pages = Vec::new();
    let mut size = None;
    loop {
        let (dims, page) = decode_page(&mut decoder)?;
        match size {
            None => size = Some(dims),
            Some(first) if first != dims => {
                return Err(IoError::InvalidData(format!(
                    "TIFF page {} is {:?}, first page is {:?}",
                    pages.len(),
                    dims,
                    first
                )));
            }
            Some(_) => {}
        }
        pages.push(page);

        if !decoder.more_images() {
            break;
        }
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }

    let (width, height) = size.unwrap_or((0, 0));
    let shape = [pages.len(), height as usize, width as usize];
    debug!("read_tiff_stack: {:?}", shape);

    let first = pages
        .first()
        .ok_or_else(|| IoError::InvalidData("TIFF has no pages".to_string()))?;
    let image = match first {
        PageData::U8(_) => stack_pages!(U8, pages, shape),
        PageData::U16(_) => stack_pages!(U16, pages, shape),
        PageData::U32(_) => stack_pages!(U32, pages, shape),
        PageData::I16(_) => stack_pages!(I16, pages, shape),
        PageData::I32(_) => stack_pages!(I32, pages, shape),
        PageData::F32(_) => stack_pages!(F32, pages, shape),
        PageData::F64(_) => stack_pages!(F64, pages, shape),
        PageData::Rgb8(_) => stack_pages!(Rgb8, pages, shape),
    };
    Ok(image)
}

/// Write a 3D stack as a multi-page TIFF, one page per z slice
///
/// Supports `u8`, `u16` and `f32` stacks.
///
/// # Errors
///
/// Returns `IoError::InvalidData` unless the stack is 3D with at least one
/// slice, and `IoError::UnsupportedFormat` for other element kinds.
pub fn write_tiff_stack<W: Write + Seek>(image: &ImageData, writer: W) -> IoResult<()> {
    let [depth, height, width] = match image.shape() {
        &[d, h, w] if d > 0 => [d, h, w],
        shape => {
            return Err(IoError::InvalidData(format!(
                "TIFF stacks must be 3D with at least one slice, got shape {:?}",
                shape
            )));
        }
    };
    let (w, h) = (width as u32, height as u32);

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;

    macro_rules! write_slices {
        ($a:expr, $colortype:ty) => {
            for z in 0..depth {
                let data: Vec<_> = $a.index_axis(Axis(0), z).iter().copied().collect();
                encoder
                    .write_image::<$colortype>(w, h, &data)
                    .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
            }
        };
    }

    match image {
        ImageData::U8(a) => write_slices!(a, Gray8),
        ImageData::U16(a) => write_slices!(a, Gray16),
        ImageData::F32(a) => write_slices!(a, Gray32Float),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} stacks as TIFF",
                other.kind()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use spotfishing_core::PixelKind;
    use std::io::Cursor;

    fn roundtrip(image: &ImageData) -> ImageData {
        let mut buf = Cursor::new(Vec::new());
        write_tiff_stack(image, &mut buf).unwrap();
        buf.set_position(0);
        read_tiff_stack(buf).unwrap()
    }

    #[test]
    fn test_u16_stack_pages_become_slices() {
        let stack = Array3::from_shape_fn((3, 5, 7), |(z, y, x)| (z * 1000 + y * 10 + x) as u16);
        let image = ImageData::from(stack);
        let read = roundtrip(&image);
        assert_eq!(read.kind(), PixelKind::U16);
        assert_eq!(read.shape(), &[3, 5, 7]);
        assert_eq!(read, image);
    }

    #[test]
    fn test_single_page_u8() {
        let stack = Array3::from_shape_fn((1, 4, 4), |(_, y, x)| (y * 4 + x) as u8);
        let image = ImageData::from(stack);
        assert_eq!(roundtrip(&image), image);
    }

    #[test]
    fn test_write_rejects_2d_and_bool() {
        let flat = ImageData::from(ndarray::Array2::<u8>::zeros((4, 4)).into_dyn());
        let mut buf = Cursor::new(Vec::new());
        assert!(matches!(
            write_tiff_stack(&flat, &mut buf),
            Err(IoError::InvalidData(_))
        ));

        let mask = ImageData::from(Array3::from_elem((1, 2, 2), true));
        let mut buf = Cursor::new(Vec::new());
        assert!(matches!(
            write_tiff_stack(&mask, &mut buf),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_garbage() {
        let buf = Cursor::new(vec![0u8; 16]);
        assert!(read_tiff_stack(buf).is_err());
    }
}

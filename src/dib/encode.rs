//! DIB encoder: uncompressed bottom-up 24-bit and 32-bit payloads.
//!
//! Produces exactly what the clipboard hands out as `CF_DIB`: a 40-byte
//! header followed directly by pixel rows, no `BM` file header.

use alloc::vec::Vec;

use super::header::{COMPRESSION_NONE, DibDepth, HEADER_LEN};
use super::utils::padded_row_bytes;
use crate::error::DibError;
use crate::image::NormalizedImage;

/// Encode `image` as a bottom-up `BI_RGB` DIB.
///
/// [`DibDepth::Bgr24`] drops alpha.
pub fn encode_dib(image: &NormalizedImage, depth: DibDepth) -> Result<Vec<u8>, DibError> {
    let w = image.width();
    let h = image.height();
    let too_large = || DibError::DimensionsTooLarge {
        width: i32::try_from(w).unwrap_or(i32::MAX),
        height: i32::try_from(h).unwrap_or(i32::MAX),
    };
    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;

    let bpp = depth.bits_per_pixel();
    let row_stride = padded_row_bytes(w, bpp).ok_or_else(too_large)?;
    let pixel_data_size = row_stride.checked_mul(h).ok_or_else(too_large)?;
    let total = pixel_data_size
        .checked_add(HEADER_LEN)
        .ok_or_else(too_large)?;
    let image_size = u32::try_from(pixel_data_size).map_err(|_| too_large())?;

    let mut out = Vec::with_capacity(total);
    write_header(&mut out, width, height, bpp, image_size);

    let pad_bytes = row_stride - w * depth.bytes_per_pixel();
    for row in image.pixels().chunks_exact(w).rev() {
        for px in row {
            match depth {
                DibDepth::Bgr24 => out.extend_from_slice(&[px.b, px.g, px.r]),
                DibDepth::Bgra32 => out.extend_from_slice(&[px.b, px.g, px.r, px.a]),
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_header(out: &mut Vec<u8>, width: i32, height: i32, bpp: u16, image_size: u32) {
    out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&COMPRESSION_NONE.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835i32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

//! Device-independent bitmap (`CF_DIB`) header parsing, unpacking and encoding.
//!
//! A DIB payload is a [`BitmapHeader`] followed, at `header_size` bytes from
//! the start, by uncompressed pixel rows. Only 24-bit and 32-bit `BI_RGB`
//! payloads decode; palettes, bitfields and RLE are rejected.

mod encode;
mod header;
mod unpack;
mod utils;

pub use encode::encode_dib;
pub use header::{BitmapHeader, COMPRESSION_NONE, DibDepth, HEADER_LEN, parse_header};
pub use unpack::unpack;

pub(crate) use unpack::RowLayout;

use crate::error::DibError;

/// Length of the `BM` file header that precedes a DIB in a `.bmp` file.
pub const FILE_HEADER_LEN: usize = 14;

/// Return the DIB payload of `data`.
///
/// A `.bmp` file starts with a 14-byte `BM` header in front of the DIB; it is
/// stripped. Anything else is assumed to already be a bare DIB and returned
/// unchanged.
pub fn strip_file_header(data: &[u8]) -> Result<&[u8], DibError> {
    if !data.starts_with(b"BM") {
        return Ok(data);
    }
    data.get(FILE_HEADER_LEN..).ok_or(DibError::TruncatedBuffer {
        needed: FILE_HEADER_LEN,
        actual: data.len(),
    })
}

/// The pixel region of `data` as described by `header`.
pub(crate) fn pixel_region<'a>(data: &'a [u8], header: &BitmapHeader) -> &'a [u8] {
    // parse_header guarantees the offset is in bounds
    data.get(header.pixel_offset()..).unwrap_or(&[])
}

//! BITMAPINFOHEADER parsing.

use super::utils::{padded_row_bytes, read_i32_le, read_u16_le, read_u32_le};
use crate::error::DibError;

/// Length of the fixed header layout.
pub const HEADER_LEN: usize = 40;

/// `BI_RGB`, the only compression value the unpacker accepts.
pub const COMPRESSION_NONE: u32 = 0;

/// Stored pixel depths the unpacker and encoder handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DibDepth {
    /// BGR, no alpha, rows padded to 4 bytes.
    Bgr24,
    /// BGRA, alpha kept.
    Bgra32,
}

impl DibDepth {
    pub fn from_bits_per_pixel(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    pub fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits_per_pixel() / 8)
    }
}

/// Fields of a DIB header, decoded from their little-endian wire form.
///
/// Values are carried through as stored. Nothing here is validated beyond
/// the two length checks in [`parse_header`]; plausibility of the numbers
/// is left to the unpacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Offset from the start of the buffer to the first pixel byte.
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up row order, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// Parse the header at the start of `data`.
///
/// Fails with [`DibError::TruncatedBuffer`] if `data` is shorter than
/// [`HEADER_LEN`] or if the declared `header_size` points past the end of
/// `data`.
pub fn parse_header(data: &[u8]) -> Result<BitmapHeader, DibError> {
    if data.len() < HEADER_LEN {
        return Err(DibError::TruncatedBuffer {
            needed: HEADER_LEN,
            actual: data.len(),
        });
    }

    let header = BitmapHeader {
        header_size: read_u32_le(data, 0)?,
        width: read_i32_le(data, 4)?,
        height: read_i32_le(data, 8)?,
        planes: read_u16_le(data, 12)?,
        bits_per_pixel: read_u16_le(data, 14)?,
        compression: read_u32_le(data, 16)?,
        image_size: read_u32_le(data, 20)?,
        x_pixels_per_meter: read_i32_le(data, 24)?,
        y_pixels_per_meter: read_i32_le(data, 28)?,
        colors_used: read_u32_le(data, 32)?,
        colors_important: read_u32_le(data, 36)?,
    };

    let pixel_offset = header.pixel_offset();
    if pixel_offset > data.len() {
        return Err(DibError::TruncatedBuffer {
            needed: pixel_offset,
            actual: data.len(),
        });
    }

    Ok(header)
}

impl BitmapHeader {
    /// Where the pixel region starts, relative to the start of the buffer.
    pub fn pixel_offset(&self) -> usize {
        // u32 -> usize only saturates on 16-bit targets
        usize::try_from(self.header_size).unwrap_or(usize::MAX)
    }

    /// Rows are stored last-row-first.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// The stored depth, `None` for anything but 24 or 32 bits.
    pub fn depth(&self) -> Option<DibDepth> {
        DibDepth::from_bits_per_pixel(self.bits_per_pixel)
    }

    /// Stored bytes per row including the padding to a 4-byte boundary.
    ///
    /// Fails for a negative width or when the stride overflows `usize`.
    pub fn row_stride(&self) -> Result<usize, DibError> {
        let width = usize::try_from(self.width).map_err(|_| DibError::InvalidDimensions {
            width: self.width,
            height: self.height,
        })?;
        padded_row_bytes(width, self.bits_per_pixel).ok_or(DibError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        })
    }

    /// Minimum length of the pixel region this header describes.
    ///
    /// Every row but the last is counted at full stride. The last row only
    /// needs its pixel bytes; its trailing padding may be missing.
    pub fn pixel_region_len(&self) -> Result<usize, DibError> {
        let stride = self.row_stride()?;
        let Some(full_rows) = (self.abs_height() as usize).checked_sub(1) else {
            return Ok(0);
        };
        // row_stride() already rejected a negative width
        let last_row = (self.width as usize)
            .checked_mul(usize::from(self.bits_per_pixel))
            .map(|bits| bits.div_ceil(8));
        full_rows
            .checked_mul(stride)
            .zip(last_row)
            .and_then(|(rows, last)| rows.checked_add(last))
            .ok_or(DibError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

use alloc::format;

use rgb::RGBA8;

use crate::dib::BitmapHeader;
use crate::error::DibError;

/// Caps on the image an allocating decode is allowed to create.
///
/// Every field defaults to `None` (unbounded). Sizes describe the decoded
/// RGBA8 image, not the stored payload: a 24-bit and a 32-bit bitmap of the
/// same dimensions count the same. Decoding into a caller-owned image never
/// consults limits, since that image is already allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    /// Applies to `|height|`, whatever the row order.
    pub max_height: Option<u32>,
    pub max_pixels: Option<u64>,
    /// Size of the output pixel buffer, four bytes per pixel.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check the image `header` decodes to.
    pub(crate) fn check(&self, header: &BitmapHeader) -> Result<(), DibError> {
        let width = header.width.unsigned_abs();
        let height = header.abs_height();
        let pixels = u64::from(width) * u64::from(height);
        let output_bytes = pixels.saturating_mul(size_of::<RGBA8>() as u64);

        within("width", width.into(), self.max_width.map(u64::from))?;
        within("height", height.into(), self.max_height.map(u64::from))?;
        within("pixel count", pixels, self.max_pixels)?;
        within("output size", output_bytes, self.max_output_bytes)
    }
}

fn within(what: &str, value: u64, max: Option<u64>) -> Result<(), DibError> {
    match max {
        Some(max) if value > max => Err(DibError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

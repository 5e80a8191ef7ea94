use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

/// Fixed-size RGBA8 image with a top-left origin.
///
/// The decoder writes into these but never resizes them, so one instance can
/// be reused across any number of decodes of same-sized bitmaps.
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    pixels: ImgVec<RGBA8>,
}

impl NormalizedImage {
    /// Allocate a `width` x `height` image filled with opaque black.
    ///
    /// Returns `None` if either dimension is zero or `width * height`
    /// overflows.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let len = width.checked_mul(height)?;
        Some(Self {
            pixels: ImgVec::new(vec![RGBA8::new(0, 0, 0, 255); len], width, height),
        })
    }

    /// Like [`try_new`](Self::try_new), for dimensions known to be valid.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Self {
        Self::try_new(width, height)
            .unwrap_or_else(|| panic!("invalid image dimensions {width}x{height}"))
    }

    /// Wrap existing row-major pixels. Returns `None` if either dimension is
    /// zero or the length is not exactly `width * height`.
    pub fn from_pixels(pixels: Vec<RGBA8>, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            pixels: ImgVec::new(pixels, width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Pixel at column `x`, row `y` (row 0 is the top).
    ///
    /// # Panics
    ///
    /// If `x` or `y` is out of range.
    pub fn pixel(&self, x: usize, y: usize) -> RGBA8 {
        assert!(x < self.width() && y < self.height(), "pixel ({x}, {y}) out of range");
        self.pixels.buf()[y * self.width() + x]
    }

    /// Row-major pixel slice, `width * height` long.
    pub fn pixels(&self) -> &[RGBA8] {
        self.pixels.buf()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [RGBA8] {
        self.pixels.buf_mut()
    }

    /// Borrow as an [`imgref::ImgRef`].
    pub fn as_imgref(&self) -> ImgRef<'_, RGBA8> {
        self.pixels.as_ref()
    }

    pub fn into_imgvec(self) -> ImgVec<RGBA8> {
        self.pixels
    }

    /// Flatten to `R, G, B, A` bytes, the layout raster encoders expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels()
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect()
    }
}

impl PartialEq for NormalizedImage {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixels() == other.pixels()
    }
}

impl Eq for NormalizedImage {}

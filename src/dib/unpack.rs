//! Pixel unpacking: stored BGR(A) rows to top-down RGBA8.

use rgb::RGBA8;

use super::header::{BitmapHeader, COMPRESSION_NONE, DibDepth};
use crate::error::DibError;
use crate::image::NormalizedImage;

/// Validated geometry of a pixel region, computed before any pixel is written.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RowLayout {
    width: usize,
    height: usize,
    depth: DibDepth,
    stride: usize,
    bottom_up: bool,
}

impl RowLayout {
    /// Check depth, compression and region length against `header`.
    ///
    /// Dimensions are not compared to any target here; see [`unpack`].
    pub(crate) fn new(header: &BitmapHeader, pixel_region: &[u8]) -> Result<Self, DibError> {
        let depth = header
            .depth()
            .ok_or(DibError::UnsupportedBitDepth(header.bits_per_pixel))?;
        if header.compression != COMPRESSION_NONE {
            return Err(DibError::UnsupportedCompression(header.compression));
        }

        let stride = header.row_stride()?;
        let needed = header.pixel_region_len()?;
        if pixel_region.len() < needed {
            return Err(DibError::TruncatedBuffer {
                needed,
                actual: pixel_region.len(),
            });
        }

        Ok(Self {
            // row_stride() already rejected a negative width
            width: header.width as usize,
            height: header.abs_height() as usize,
            depth,
            stride,
            bottom_up: header.is_bottom_up(),
        })
    }

    /// Offset of the stored row that lands on output row `y`.
    fn source_row_offset(&self, y: usize) -> usize {
        let row = if self.bottom_up {
            self.height - 1 - y
        } else {
            y
        };
        row * self.stride
    }

    pub(crate) fn write(&self, pixel_region: &[u8], target: &mut NormalizedImage) {
        let row_bytes = self.width * self.depth.bytes_per_pixel();
        let out_rows = target.pixels_mut().chunks_exact_mut(self.width);

        for (y, out) in out_rows.enumerate() {
            let start = self.source_row_offset(y);
            let src = &pixel_region[start..start + row_bytes];
            match self.depth {
                DibDepth::Bgra32 => {
                    for (px, bgra) in out.iter_mut().zip(src.chunks_exact(4)) {
                        *px = RGBA8::new(bgra[2], bgra[1], bgra[0], bgra[3]);
                    }
                }
                DibDepth::Bgr24 => {
                    for (px, bgr) in out.iter_mut().zip(src.chunks_exact(3)) {
                        *px = RGBA8::new(bgr[2], bgr[1], bgr[0], 255);
                    }
                }
            }
        }
    }
}

/// Unpack `pixel_region` (the bytes starting at the header's pixel offset)
/// into `target`.
///
/// `target` must be exactly `width` x `|height|` of the header, otherwise
/// [`DibError::DimensionMismatch`]. Every check runs before the first write,
/// so `target` is left untouched on any error.
///
/// - 32 bpp: B, G, R, A per pixel, rows never padded.
/// - 24 bpp: B, G, R per pixel, alpha set to 255, each row padded to a
///   multiple of 4 bytes. The last row's padding may be absent.
/// - Anything else: [`DibError::UnsupportedBitDepth`].
///
/// Positive heights store the bottom row first and are flipped; negative
/// heights are already top-down.
pub fn unpack(
    header: &BitmapHeader,
    pixel_region: &[u8],
    target: &mut NormalizedImage,
) -> Result<(), DibError> {
    check_dimensions(header, target)?;
    let layout = RowLayout::new(header, pixel_region)?;
    layout.write(pixel_region, target);
    Ok(())
}

fn check_dimensions(header: &BitmapHeader, target: &NormalizedImage) -> Result<(), DibError> {
    let expected = (i64::from(header.width), i64::from(header.abs_height()));
    let actual = (target.width() as i64, target.height() as i64);
    if expected != actual {
        return Err(DibError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn header(width: i32, height: i32, bpp: u16) -> BitmapHeader {
        BitmapHeader {
            header_size: 40,
            width,
            height,
            planes: 1,
            bits_per_pixel: bpp,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    fn marked(width: usize, height: usize) -> NormalizedImage {
        let px = vec![RGBA8::new(1, 2, 3, 4); width * height];
        NormalizedImage::from_pixels(px, width, height).unwrap()
    }

    #[test]
    fn channel_reorder_32() {
        let mut img = marked(1, 1);
        unpack(&header(1, 1, 32), &[10, 20, 30, 40], &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), RGBA8::new(30, 20, 10, 40));
    }

    #[test]
    fn channel_reorder_24_is_opaque() {
        let mut img = marked(1, 1);
        unpack(&header(1, 1, 24), &[10, 20, 30, 0], &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), RGBA8::new(30, 20, 10, 255));
    }

    #[test]
    fn bottom_up_rows_are_flipped() {
        // 1x3, stored rows carry their storage index in the blue byte
        let region: Vec<u8> = (0..3u8).flat_map(|row| [row, 0, 0, 255]).collect();
        let mut img = marked(1, 3);
        unpack(&header(1, 3, 32), &region, &mut img).unwrap();
        assert_eq!(img.pixel(0, 0).b, 2);
        assert_eq!(img.pixel(0, 1).b, 1);
        assert_eq!(img.pixel(0, 2).b, 0);
    }

    #[test]
    fn top_down_rows_keep_order() {
        let region: Vec<u8> = (0..3u8).flat_map(|row| [row, 0, 0, 255]).collect();
        let mut img = marked(1, 3);
        unpack(&header(1, -3, 32), &region, &mut img).unwrap();
        assert_eq!(img.pixel(0, 0).b, 0);
        assert_eq!(img.pixel(0, 2).b, 2);
    }

    #[test]
    fn row_padding_24_is_skipped() {
        // 1 pixel wide: 3 data bytes + 1 pad byte per row
        let region = [
            1, 1, 1, 0xEE, // stored row 0 -> output row 1
            2, 2, 2, 0xEE, // stored row 1 -> output row 0
        ];
        let mut img = marked(1, 2);
        unpack(&header(1, 2, 24), &region, &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), RGBA8::new(2, 2, 2, 255));
        assert_eq!(img.pixel(0, 1), RGBA8::new(1, 1, 1, 255));
    }

    #[test]
    fn dimension_mismatch_leaves_target_untouched() {
        let mut img = marked(2, 2);
        let before = img.clone();
        let err = unpack(&header(2, 3, 32), &[0u8; 24], &mut img).unwrap_err();
        assert_eq!(
            err,
            DibError::DimensionMismatch {
                expected: (2, 3),
                actual: (2, 2)
            }
        );
        assert_eq!(img, before);

        let err = unpack(&header(-2, 2, 32), &[0u8; 16], &mut img).unwrap_err();
        assert!(matches!(err, DibError::DimensionMismatch { .. }));
        assert_eq!(img, before);
    }

    #[test]
    fn unsupported_depths() {
        for bpp in [0u16, 1, 4, 8, 16, 48, 64] {
            let mut img = marked(1, 1);
            let before = img.clone();
            let err = unpack(&header(1, 1, bpp), &[0u8; 64], &mut img).unwrap_err();
            assert_eq!(err, DibError::UnsupportedBitDepth(bpp));
            assert_eq!(img, before);
        }
    }

    #[test]
    fn compressed_data_rejected() {
        let mut hdr = header(1, 1, 32);
        hdr.compression = 3;
        let mut img = marked(1, 1);
        let before = img.clone();
        assert_eq!(
            unpack(&hdr, &[0u8; 16], &mut img),
            Err(DibError::UnsupportedCompression(3))
        );
        assert_eq!(img, before);
    }

    #[test]
    fn short_region_is_truncated() {
        let mut img = marked(3, 2);
        let before = img.clone();
        // 24 bpp, width 3: stride 12, last row 9, needs 21 bytes
        let err = unpack(&header(3, 2, 24), &[0u8; 20], &mut img).unwrap_err();
        assert_eq!(
            err,
            DibError::TruncatedBuffer {
                needed: 21,
                actual: 20
            }
        );
        assert_eq!(img, before);
    }

    #[test]
    fn last_row_padding_may_be_missing() {
        // width 1: stored row 0 padded to 4 bytes, row 1 stops after its pixel
        let region = [1, 1, 1, 0xEE, 2, 2, 2];
        let mut img = marked(1, 2);
        unpack(&header(1, 2, 24), &region, &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), RGBA8::new(2, 2, 2, 255));
        assert_eq!(img.pixel(0, 1), RGBA8::new(1, 1, 1, 255));
    }

    #[test]
    fn extra_trailing_bytes_are_ignored() {
        let mut img = marked(1, 1);
        unpack(&header(1, 1, 32), &[1, 2, 3, 4, 9, 9, 9, 9], &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), RGBA8::new(3, 2, 1, 4));
    }
}

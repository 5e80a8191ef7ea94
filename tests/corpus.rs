//! Test corpus: roundtrips over patterns and sizes, plus malformed input.

use dibcap::*;

fn checkerboard(w: usize, h: usize) -> NormalizedImage {
    let mut px = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            px.push(if (x + y) % 2 == 0 {
                RGBA8::new(200, 220, 240, 255)
            } else {
                RGBA8::new(10, 40, 70, 100)
            });
        }
    }
    NormalizedImage::from_pixels(px, w, h).unwrap()
}

fn noise_pattern(w: usize, h: usize) -> NormalizedImage {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    let px = (0..w * h)
        .map(|_| RGBA8::new(next(), next(), next(), next()))
        .collect();
    NormalizedImage::from_pixels(px, w, h).unwrap()
}

fn opaque(img: &NormalizedImage) -> Vec<RGBA8> {
    img.pixels()
        .iter()
        .map(|p| RGBA8::new(p.r, p.g, p.b, 255))
        .collect()
}

// ── Roundtrips ───────────────────────────────────────────────────────

#[test]
fn bgra32_sizes() {
    for (w, h) in [(1, 1), (1, 9), (9, 1), (7, 5), (16, 12), (33, 3)] {
        let img = noise_pattern(w, h);
        let encoded = encode_dib(&img, DibDepth::Bgra32).unwrap();
        assert_eq!(encoded.len(), 40 + w * h * 4, "{w}x{h}");
        assert_eq!(decode(&encoded).unwrap(), img, "{w}x{h}");
    }
}

#[test]
fn bgr24_every_padding_remainder() {
    // widths 1..=4 hit padding of 1, 2, 3 and 0 bytes
    for w in 1..=8 {
        let img = checkerboard(w, 3);
        let encoded = encode_dib(&img, DibDepth::Bgr24).unwrap();
        let pad = (4 - (3 * w) % 4) % 4;
        assert_eq!(encoded.len(), 40 + (3 * w + pad) * 3, "width {w}");

        let mut target = NormalizedImage::new(w, 3);
        decode_into(&encoded, &mut target).unwrap();
        assert_eq!(target.pixels(), &opaque(&img)[..], "width {w}");
    }
}

#[test]
fn top_down_dib() {
    let img = noise_pattern(4, 3);
    let mut encoded = encode_dib(&img, DibDepth::Bgra32).unwrap();

    // Rewrite as top-down: negate height and reverse the stored rows.
    encoded[8..12].copy_from_slice(&(-3i32).to_le_bytes());
    let rows: Vec<Vec<u8>> = encoded[40..].chunks(16).map(<[u8]>::to_vec).collect();
    encoded.truncate(40);
    for row in rows.iter().rev() {
        encoded.extend_from_slice(row);
    }

    let header = parse_header(&encoded).unwrap();
    assert!(!header.is_bottom_up());
    assert_eq!(decode(&encoded).unwrap(), img);
}

#[test]
fn pixel_offset_past_header() {
    // header_size larger than 40: pixel data starts later
    let img = checkerboard(2, 2);
    let encoded = encode_dib(&img, DibDepth::Bgra32).unwrap();

    let mut shifted = encoded[..40].to_vec();
    shifted[0..4].copy_from_slice(&44u32.to_le_bytes());
    shifted.extend_from_slice(&[0xAA; 4]);
    shifted.extend_from_slice(&encoded[40..]);

    assert_eq!(decode(&shifted).unwrap(), img);
}

// ── Malformed input ─────────────────────────────────────────────────

#[test]
fn truncation_sweep_never_panics() {
    let img = noise_pattern(5, 4);
    for depth in [DibDepth::Bgr24, DibDepth::Bgra32] {
        let encoded = encode_dib(&img, depth).unwrap();
        let header = parse_header(&encoded).unwrap();
        let min_len = header.pixel_offset() + header.pixel_region_len().unwrap();
        for len in 0..min_len {
            let mut target = NormalizedImage::new(5, 4);
            let before = target.clone();
            let err = decode_into(&encoded[..len], &mut target).unwrap_err();
            assert!(
                matches!(err, DibError::TruncatedBuffer { .. }),
                "{depth:?} len {len}: {err:?}"
            );
            assert_eq!(target, before);
        }

        // the last row's padding is optional
        let mut target = NormalizedImage::new(5, 4);
        decode_into(&encoded[..min_len], &mut target).unwrap();
        assert_eq!(decode(&encoded).unwrap(), target);
    }
}

#[test]
fn header_size_beyond_buffer() {
    let mut encoded = encode_dib(&checkerboard(2, 2), DibDepth::Bgra32).unwrap();
    let len = encoded.len() as u32;
    encoded[0..4].copy_from_slice(&(len + 1).to_le_bytes());
    assert_eq!(
        parse_header(&encoded),
        Err(DibError::TruncatedBuffer {
            needed: len as usize + 1,
            actual: len as usize
        })
    );
}

#[test]
fn header_size_at_end_leaves_empty_region() {
    let mut encoded = encode_dib(&checkerboard(2, 2), DibDepth::Bgra32).unwrap();
    let len = encoded.len() as u32;
    encoded[0..4].copy_from_slice(&len.to_le_bytes());
    assert!(parse_header(&encoded).is_ok());
    assert!(matches!(
        decode(&encoded),
        Err(DibError::TruncatedBuffer { actual: 0, .. })
    ));
}

#[test]
fn unsupported_depths_leave_target_untouched() {
    for bpp in [1u16, 4, 8, 16] {
        let mut encoded = encode_dib(&checkerboard(2, 2), DibDepth::Bgra32).unwrap();
        encoded[14..16].copy_from_slice(&bpp.to_le_bytes());

        let mut target = NormalizedImage::new(2, 2);
        let before = target.clone();
        assert_eq!(
            decode_into(&encoded, &mut target),
            Err(DibError::UnsupportedBitDepth(bpp))
        );
        assert_eq!(target, before);
    }
}

#[test]
fn dimension_mismatch_leaves_target_untouched() {
    let encoded = encode_dib(&checkerboard(4, 3), DibDepth::Bgra32).unwrap();
    for (w, h) in [(3, 4), (4, 2), (5, 3), (1, 1)] {
        let mut target = NormalizedImage::new(w, h);
        let before = target.clone();
        let err = decode_into(&encoded, &mut target).unwrap_err();
        assert_eq!(
            err,
            DibError::DimensionMismatch {
                expected: (4, 3),
                actual: (w as i64, h as i64)
            }
        );
        assert_eq!(target, before);
    }
}

#[test]
fn compressed_variants_rejected() {
    for compression in [1u32, 2, 3, 4, 5, 6] {
        let mut encoded = encode_dib(&checkerboard(2, 2), DibDepth::Bgra32).unwrap();
        encoded[16..20].copy_from_slice(&compression.to_le_bytes());
        assert_eq!(
            decode(&encoded),
            Err(DibError::UnsupportedCompression(compression))
        );
    }
}

#[test]
fn degenerate_dimensions_rejected_when_allocating() {
    for (w, h) in [(0, 1), (1, 0), (-2, 2)] {
        let mut encoded = encode_dib(&checkerboard(1, 1), DibDepth::Bgra32).unwrap();
        encoded[4..8].copy_from_slice(&(w as i32).to_le_bytes());
        encoded[8..12].copy_from_slice(&(h as i32).to_le_bytes());
        assert!(
            matches!(decode(&encoded), Err(DibError::InvalidDimensions { .. })),
            "{w}x{h}"
        );
    }
}

#[test]
fn huge_declared_size_is_truncation_not_allocation() {
    let mut encoded = encode_dib(&checkerboard(1, 1), DibDepth::Bgra32).unwrap();
    encoded[4..8].copy_from_slice(&i32::MAX.to_le_bytes());
    encoded[8..12].copy_from_slice(&i32::MAX.to_le_bytes());
    assert!(matches!(
        decode(&encoded),
        Err(DibError::TruncatedBuffer { .. } | DibError::DimensionsTooLarge { .. })
    ));
}

#![no_main]
use libfuzzer_sys::fuzz_target;

use dibcap::{DecodeRequest, Limits, NormalizedImage};

fuzz_target!(|data: &[u8]| {
    // Allocating decode, bounded so huge declared sizes can't OOM: must never panic
    let limits = Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = DecodeRequest::new(data).with_limits(&limits).decode();

    // Fixed-size target, as the capture loop uses it: must never panic
    let mut target = NormalizedImage::new(16, 16);
    let _ = DecodeRequest::new(data).decode_into(&mut target);
});

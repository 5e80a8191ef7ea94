//! # dibcap
//!
//! Decoder for device-independent bitmaps (the `CF_DIB` clipboard format)
//! plus an optional capture loop that polls a source for bitmaps and writes
//! each one out as a numbered PNG.
//!
//! ## Decoding
//!
//! A DIB payload is a 40-byte little-endian header followed by pixel rows.
//! [`parse_header`] reads the header with bounds-checked field extraction;
//! [`unpack`] converts the rows to top-left-origin RGBA8 in a
//! [`NormalizedImage`]. Supported layouts:
//!
//! - **32 bpp** `BI_RGB`: BGRA, alpha copied through
//! - **24 bpp** `BI_RGB`: BGR with 4-byte row padding, alpha set to 255
//!
//! Bottom-up (positive height) rows are flipped; top-down rows are not.
//! Every failure is a typed [`DibError`], checked before the first pixel is
//! written, so a reused target image is never left half-updated.
//!
//! ## Non-Goals
//!
//! - Palette, bitfield and RLE variants
//! - Bit depths other than 24 and 32
//!
//! ## Usage
//!
//! ```no_run
//! use dibcap::{DecodeRequest, NormalizedImage, parse_header};
//!
//! let payload: &[u8] = &[]; // CF_DIB bytes
//!
//! let header = parse_header(payload)?;
//! println!("{}x{} @ {} bpp", header.width, header.height, header.bits_per_pixel);
//!
//! let mut frame = NormalizedImage::new(1920, 1080);
//! DecodeRequest::new(payload).decode_into(&mut frame)?;
//! # Ok::<(), dibcap::DibError>(())
//! ```
//!
//! ## Capture (`capture` feature)
//!
//! [`capture::CaptureLoop`] ties a [`capture::DibSource`] (the Windows
//! clipboard, or a file path) to a [`capture::FrameSink`] (PNG files named
//! from a `printf`-style pattern), retrying on a fixed interval whenever no
//! decodable bitmap is available.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod image;
mod limits;

pub mod dib;

#[cfg(feature = "capture")]
pub mod capture;

// Re-exports
pub use decode::{DecodeRequest, decode, decode_into};
pub use dib::{BitmapHeader, DibDepth, encode_dib, parse_header, strip_file_header, unpack};
pub use enough::{Stop, Unstoppable};
pub use error::DibError;
pub use image::NormalizedImage;
pub use limits::Limits;
pub use rgb::RGBA8;

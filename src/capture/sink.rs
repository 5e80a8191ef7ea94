//! Where decoded frames go.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::{CaptureError, OutputPattern};
use crate::image::NormalizedImage;

/// Persists one decoded frame per call.
pub trait FrameSink {
    /// Store `frame` as capture number `index`, returning where it went.
    fn persist(&mut self, index: u64, frame: &NormalizedImage) -> Result<PathBuf, CaptureError>;
}

/// Writes each frame as an 8-bit RGBA PNG named by an [`OutputPattern`].
#[derive(Debug, Clone)]
pub struct PngSink {
    pattern: OutputPattern,
}

impl PngSink {
    pub fn new(pattern: OutputPattern) -> Self {
        Self { pattern }
    }
}

impl FrameSink for PngSink {
    fn persist(&mut self, index: u64, frame: &NormalizedImage) -> Result<PathBuf, CaptureError> {
        let path = self.pattern.render(index);
        let io_err = |source| CaptureError::Io {
            path: path.clone(),
            source,
        };

        let mut out = BufWriter::new(File::create(&path).map_err(io_err)?);
        write_png(&mut out, frame)?;
        out.flush().map_err(io_err)?;
        Ok(path)
    }
}

/// Encode `frame` as an RGBA8 PNG into `out`.
pub fn write_png<W: Write>(out: W, frame: &NormalizedImage) -> Result<(), CaptureError> {
    let too_large = || {
        CaptureError::Config(format!(
            "frame {}x{} too large for PNG",
            frame.width(),
            frame.height()
        ))
    };
    let width = u32::try_from(frame.width()).map_err(|_| too_large())?;
    let height = u32::try_from(frame.height()).map_err(|_| too_large())?;

    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba_bytes())?;
    writer.finish()?;
    Ok(())
}

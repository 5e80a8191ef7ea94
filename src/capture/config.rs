use std::time::Duration;

use super::{CaptureError, OutputPattern};

/// Capture loop settings.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Expected bitmap width. Bitmaps of any other size are skipped.
    pub width: u32,
    /// Expected bitmap height. Bitmaps of any other size are skipped.
    pub height: u32,
    /// Index substituted into the first written filename.
    pub start_index: u64,
    /// Sleep between polls when nothing decodable was available.
    pub poll_interval: Duration,
    pub pattern: OutputPattern,
    /// Stop after this many frames; `None` runs until cancelled.
    pub max_frames: Option<u64>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            start_index: 500,
            poll_interval: Duration::from_millis(200),
            pattern: OutputPattern::default(),
            max_frames: None,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::Config(format!(
                "frame size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(CaptureError::Config(format!(
                "frame size {}x{} exceeds the DIB range",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

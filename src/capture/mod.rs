//! Polling capture loop: acquire a DIB, decode it, persist it, repeat.
//!
//! Each iteration is one unit of acquire → decode → persist. A missing
//! payload, a failed acquisition or an undecodable payload (wrong size,
//! unsupported depth, truncated) all count as "not ready yet": the loop
//! sleeps for the poll interval and tries again. Only persistence failures
//! end the loop.

mod config;
mod pattern;
mod sink;
mod source;

pub use config::CaptureConfig;
pub use pattern::OutputPattern;
pub use sink::{FrameSink, PngSink, write_png};
#[cfg(windows)]
pub use source::WindowsClipboard;
pub use source::{DibSource, FileSource};

use std::path::PathBuf;
use std::thread;

use enough::{Stop, StopReason};

use crate::decode::DecodeRequest;
use crate::error::DibError;
use crate::image::NormalizedImage;

/// Errors from the capture side: sources, sinks and configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CaptureError {
    #[error(transparent)]
    Decode(#[from] DibError),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("invalid output pattern {0}")]
    Pattern(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("capture cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for CaptureError {
    fn from(r: StopReason) -> Self {
        CaptureError::Cancelled(r)
    }
}

/// What one [`CaptureLoop::poll_once`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A frame was decoded and written.
    Saved { index: u64, path: PathBuf },
    /// The source had nothing.
    Empty,
    /// The source had a payload that did not decode into the frame.
    Rejected(DibError),
    /// The source itself failed; retried like an empty poll.
    SourceFailed,
}

/// Drives a [`DibSource`] into a [`FrameSink`] through one reused frame.
#[derive(Debug)]
pub struct CaptureLoop<S, K> {
    source: S,
    sink: K,
    config: CaptureConfig,
    frame: NormalizedImage,
    next_index: u64,
    saved: u64,
}

impl<S: DibSource, K: FrameSink> CaptureLoop<S, K> {
    pub fn new(source: S, sink: K, config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        let frame = NormalizedImage::try_new(config.width as usize, config.height as usize)
            .ok_or_else(|| {
                CaptureError::Config(format!(
                    "cannot allocate a {}x{} frame",
                    config.width, config.height
                ))
            })?;
        log::info!(
            "created an output frame of {}x{}",
            frame.width(),
            frame.height()
        );
        Ok(Self {
            source,
            sink,
            next_index: config.start_index,
            config,
            frame,
            saved: 0,
        })
    }

    /// One acquire → decode → persist pass. Never sleeps.
    pub fn poll_once(&mut self) -> Result<PollOutcome, CaptureError> {
        let payload = match self.source.acquire() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(PollOutcome::Empty),
            Err(e) => {
                log::debug!("source not ready: {e}");
                return Ok(PollOutcome::SourceFailed);
            }
        };

        if let Err(e) = DecodeRequest::new(&payload).decode_into(&mut self.frame) {
            log::warn!("skipping {} byte bitmap: {e}", payload.len());
            return Ok(PollOutcome::Rejected(e));
        }

        let index = self.next_index;
        let path = self.sink.persist(index, &self.frame)?;
        log::info!("wrote {}", path.display());
        self.next_index += 1;
        self.saved += 1;
        Ok(PollOutcome::Saved { index, path })
    }

    /// Poll until `max_frames` frames are saved or `stop` fires.
    ///
    /// Returns the number of frames saved by this call.
    pub fn run(&mut self, stop: &dyn Stop) -> Result<u64, CaptureError> {
        let mut saved = 0u64;
        loop {
            if self.config.max_frames.is_some_and(|max| self.saved >= max) {
                return Ok(saved);
            }
            stop.check()?;

            match self.poll_once()? {
                PollOutcome::Saved { .. } => saved += 1,
                _ => thread::sleep(self.config.poll_interval),
            }
        }
    }

    /// Index the next saved frame will get.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// The most recently decoded frame.
    pub fn frame(&self) -> &NormalizedImage {
        &self.frame
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

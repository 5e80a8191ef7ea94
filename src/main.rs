use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dibcap::Unstoppable;
use dibcap::capture::{
    CaptureConfig, CaptureError, CaptureLoop, DibSource, FileSource, OutputPattern, PngSink,
};

/// Poll for bitmaps and save each one as a numbered PNG.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Width of the captured bitmaps; other sizes are skipped
    #[arg(short, long, default_value_t = 1920, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height of the captured bitmaps; other sizes are skipped
    #[arg(short = 'H', long, default_value_t = 1080, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Index used for the first output file
    #[arg(short, long, default_value_t = 500)]
    index: u64,

    /// Output filename pattern with one %d placeholder
    #[arg(short, long, default_value = "cap-%06d.png", value_parser = parse_pattern)]
    format: OutputPattern,

    /// Milliseconds to wait between polls when nothing was captured
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,

    /// Where bitmaps come from: `clipboard` (Windows only) or `file:<path>`
    #[arg(short, long, value_parser = parse_source)]
    source: Option<SourceArg>,

    /// Do not clear the clipboard or delete the source file after reading
    #[arg(long)]
    keep: bool,

    /// Exit after this many frames
    #[arg(long)]
    max_frames: Option<u64>,
}

#[derive(Clone, Debug)]
enum SourceArg {
    Clipboard,
    File(PathBuf),
}

fn parse_pattern(s: &str) -> Result<OutputPattern, String> {
    OutputPattern::parse(s).map_err(|e| e.to_string())
}

fn parse_source(s: &str) -> Result<SourceArg, String> {
    if s == "clipboard" {
        return Ok(SourceArg::Clipboard);
    }
    match s.strip_prefix("file:") {
        Some(path) if !path.is_empty() => Ok(SourceArg::File(PathBuf::from(path))),
        _ => Err(format!("expected `clipboard` or `file:<path>`, got {s:?}")),
    }
}

impl Cli {
    fn config(&self) -> CaptureConfig {
        CaptureConfig {
            width: self.width,
            height: self.height,
            start_index: self.index,
            poll_interval: Duration::from_millis(self.interval_ms),
            pattern: self.format.clone(),
            max_frames: self.max_frames,
        }
    }

    fn source(&self) -> Result<Box<dyn DibSource>, CaptureError> {
        let choice = match &self.source {
            Some(choice) => choice.clone(),
            None if cfg!(windows) => SourceArg::Clipboard,
            None => {
                return Err(CaptureError::Config(
                    "no clipboard source on this platform, pass --source file:<path>".into(),
                ));
            }
        };

        match choice {
            SourceArg::File(path) => {
                log::info!("watching {}", path.display());
                let source = FileSource::new(path);
                Ok(Box::new(if self.keep { source.keep_file() } else { source }))
            }
            SourceArg::Clipboard => clipboard_source(self.keep),
        }
    }

    fn run(self) -> Result<(), CaptureError> {
        let config = self.config();
        let sink = PngSink::new(config.pattern.clone());
        let mut capture = CaptureLoop::new(self.source()?, sink, config)?;
        let saved = capture.run(&Unstoppable)?;
        log::info!("captured {saved} frames");
        Ok(())
    }
}

#[cfg(windows)]
fn clipboard_source(keep: bool) -> Result<Box<dyn DibSource>, CaptureError> {
    let clipboard = dibcap::capture::WindowsClipboard::new();
    Ok(Box::new(if keep { clipboard.keep_contents() } else { clipboard }))
}

#[cfg(not(windows))]
fn clipboard_source(_keep: bool) -> Result<Box<dyn DibSource>, CaptureError> {
    Err(CaptureError::Clipboard(
        "reading CF_DIB is only supported on Windows".into(),
    ))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

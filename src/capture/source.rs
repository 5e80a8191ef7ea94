//! Where DIB payloads come from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CaptureError;
use crate::dib::{self, parse_header, strip_file_header};

/// Something that can be polled for a DIB payload.
pub trait DibSource {
    /// Take the current payload, if there is one.
    ///
    /// `Ok(None)` means nothing is available yet. An `Err` is treated by the
    /// capture loop as transient and retried.
    fn acquire(&mut self) -> Result<Option<Vec<u8>>, CaptureError>;
}

impl<S: DibSource + ?Sized> DibSource for Box<S> {
    fn acquire(&mut self) -> Result<Option<Vec<u8>>, CaptureError> {
        (**self).acquire()
    }
}

/// Polls a single path for a `.bmp` file or a bare DIB dump.
///
/// With `consume` set the file is deleted once read, so the same bitmap is
/// never captured twice. A file that is still shorter than its header
/// declares is left in place: the writer may not be done with it yet, and
/// the next poll reads it again.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    consume: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consume: true,
        }
    }

    /// Leave the file in place after reading it.
    pub fn keep_file(mut self) -> Self {
        self.consume = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DibSource for FileSource {
    fn acquire(&mut self) -> Result<Option<Vec<u8>>, CaptureError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CaptureError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let payload = strip_file_header(&data)?;
        if self.consume {
            if is_partial(payload) {
                log::debug!("{} is incomplete, leaving it in place", self.path.display());
            } else {
                fs::remove_file(&self.path).map_err(|source| CaptureError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        if payload.len() == data.len() {
            Ok(Some(data))
        } else {
            Ok(Some(payload.to_vec()))
        }
    }
}

/// The payload ends before the pixel bytes its header declares.
fn is_partial(payload: &[u8]) -> bool {
    // parse_header only fails on a short buffer
    let Ok(header) = parse_header(payload) else {
        return true;
    };
    header
        .pixel_region_len()
        .is_ok_and(|needed| dib::pixel_region(payload, &header).len() < needed)
}

#[cfg(windows)]
pub use self::windows_clipboard::WindowsClipboard;

#[cfg(windows)]
#[allow(unsafe_code)]
mod windows_clipboard {
    use windows::Win32::Foundation::HGLOBAL;
    use windows::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, GetClipboardData, OpenClipboard,
    };
    use windows::Win32::System::Memory::{GlobalLock, GlobalSize, GlobalUnlock};
    use windows::Win32::System::Ole::CF_DIB;

    use super::DibSource;
    use crate::capture::CaptureError;

    /// Reads `CF_DIB` from the Windows clipboard.
    ///
    /// The clipboard is open only for the duration of one [`acquire`] call;
    /// nothing is held between polls. By default the clipboard is emptied
    /// after a successful read so each copied image is captured once.
    ///
    /// [`acquire`]: DibSource::acquire
    #[derive(Debug)]
    pub struct WindowsClipboard {
        clear_after_read: bool,
    }

    impl WindowsClipboard {
        pub fn new() -> Self {
            Self {
                clear_after_read: true,
            }
        }

        /// Leave the clipboard contents in place after reading.
        pub fn keep_contents(mut self) -> Self {
            self.clear_after_read = false;
            self
        }
    }

    impl Default for WindowsClipboard {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Open clipboard; closed on drop.
    struct OpenClipboardGuard;

    impl OpenClipboardGuard {
        fn open() -> Result<Self, CaptureError> {
            unsafe { OpenClipboard(None) }
                .map_err(|e| CaptureError::Clipboard(format!("OpenClipboard failed: {e}")))?;
            Ok(Self)
        }
    }

    impl Drop for OpenClipboardGuard {
        fn drop(&mut self) {
            let _ = unsafe { CloseClipboard() };
        }
    }

    /// Locked global memory block; unlocked on drop.
    struct GlobalLockGuard {
        handle: HGLOBAL,
        ptr: *const u8,
        len: usize,
    }

    impl GlobalLockGuard {
        fn lock(handle: HGLOBAL) -> Result<Self, CaptureError> {
            let ptr = unsafe { GlobalLock(handle) } as *const u8;
            if ptr.is_null() {
                return Err(CaptureError::Clipboard("GlobalLock failed".into()));
            }
            let len = unsafe { GlobalSize(handle) };
            Ok(Self { handle, ptr, len })
        }

        fn bytes(&self) -> &[u8] {
            // The block stays locked, and so valid for `len` bytes, until drop.
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    impl Drop for GlobalLockGuard {
        fn drop(&mut self) {
            let _ = unsafe { GlobalUnlock(self.handle) };
        }
    }

    impl DibSource for WindowsClipboard {
        fn acquire(&mut self) -> Result<Option<Vec<u8>>, CaptureError> {
            let _open = OpenClipboardGuard::open()?;

            let Ok(handle) = (unsafe { GetClipboardData(u32::from(CF_DIB.0)) }) else {
                return Ok(None);
            };

            let payload = {
                let lock = GlobalLockGuard::lock(HGLOBAL(handle.0))?;
                lock.bytes().to_vec()
            };

            if self.clear_after_read {
                if let Err(e) = unsafe { EmptyClipboard() } {
                    log::debug!("EmptyClipboard failed: {e}");
                }
            }

            Ok(Some(payload))
        }
    }
}

//! Owned native stream handles and their open/adopt/close primitives

use crate::error::{last_os_error, nul_error, BackendError, Result};
use crate::tracker;
use log::trace;
use std::ffi::CString;
use std::fmt;
use std::mem::ManuallyDrop;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;
use std::ptr::NonNull;

/// Owned token for one live C `FILE *` stream
///
/// Exactly one `NativeStream` exists per stream opened through this crate.
/// [`close`] consumes it; dropping it without calling [`close`] still releases
/// the stream (errors from that release are ignored).
pub struct NativeStream {
    /// The underlying stream, never null
    ptr: NonNull<libc::FILE>,
    /// Whether this stream is counted by [`tracker`]
    tracked: bool,
    /// Read failure held back because the same call already returned data
    deferred: Option<BackendError>,
}

// SAFETY: a `FILE *` is not tied to the thread that opened it; the C library
// serializes access to each stream internally. `NativeStream` is not `Sync`,
// so shared references never reach two threads at once.
unsafe impl Send for NativeStream {}

impl NativeStream {
    /// Wrap a stream returned by `fopen`/`fdopen` and count it as open
    fn opened(ptr: NonNull<libc::FILE>) -> Self {
        tracker::stream_opened();
        Self {
            ptr,
            tracked: true,
            deferred: None,
        }
    }

    /// Take ownership of a stream that was opened outside this crate
    ///
    /// Returns `None` if `ptr` is null. The stream is not counted by
    /// [`open_stream_count`](crate::open_stream_count).
    ///
    /// # Safety
    ///
    /// `ptr` must be a live stream that nothing else will close, and no other
    /// `NativeStream` may wrap the same pointer.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut libc::FILE) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            tracked: false,
            deferred: None,
        })
    }

    /// Raw pointer for passing to C library functions
    pub(crate) fn as_ptr(&self) -> *mut libc::FILE {
        self.ptr.as_ptr()
    }

    /// Hold a read failure until the next read
    pub(crate) fn defer_error(&mut self, err: BackendError) {
        self.deferred = Some(err);
    }

    /// Take the held read failure, if any
    pub(crate) fn take_deferred_error(&mut self) -> Option<BackendError> {
        self.deferred.take()
    }
}

impl fmt::Debug for NativeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeStream")
            .field("ptr", &self.ptr)
            .field("fd", &descriptor_of(self))
            .finish()
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        // SAFETY: `ptr` is live; `close` bypasses this impl via ManuallyDrop.
        unsafe {
            libc::fclose(self.as_ptr());
        }
        if self.tracked {
            tracker::stream_closed();
        }
    }
}

/// Open a stream by path with an `fopen` mode string
///
/// # Arguments
///
/// * `path` - Path of the file to open
/// * `mode` - `fopen` mode (`"r"`, `"w"`, `"a"`, `"r+"`, `"w+"`, `"a+"`, optionally with `b`)
///
/// # Errors
///
/// Returns `BackendError::Nul` if `path` or `mode` contains a NUL byte, or
/// `BackendError::Os` with the `errno` set by `fopen`.
pub fn open_by_path(path: &Path, mode: &str) -> Result<NativeStream> {
    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| nul_error("fopen"))?;
    let c_mode = CString::new(mode).map_err(|_| nul_error("fopen"))?;

    // SAFETY: both arguments are valid NUL-terminated strings.
    let ptr = unsafe { libc::fopen(c_path.as_ptr(), c_mode.as_ptr()) };
    match NonNull::new(ptr) {
        Some(ptr) => {
            trace!("fopen({}, {mode:?}) -> {ptr:p}", path.display());
            Ok(NativeStream::opened(ptr))
        }
        None => Err(last_os_error("fopen")),
    }
}

/// Adopt an open file descriptor as a stream with `fdopen`
///
/// On success the descriptor belongs to the returned stream and is closed by
/// [`close`]. On failure the descriptor is untouched and still owned by the caller.
///
/// # Errors
///
/// Returns `BackendError::Nul` if `mode` contains a NUL byte, or
/// `BackendError::Os` with the `errno` set by `fdopen` (e.g. `EBADF`).
pub fn adopt_descriptor(fd: RawFd, mode: &str) -> Result<NativeStream> {
    let c_mode = CString::new(mode).map_err(|_| nul_error("fdopen"))?;

    // SAFETY: `c_mode` is a valid NUL-terminated string; fdopen validates `fd`.
    let ptr = unsafe { libc::fdopen(fd, c_mode.as_ptr()) };
    match NonNull::new(ptr) {
        Some(ptr) => {
            trace!("fdopen({fd}, {mode:?}) -> {ptr:p}");
            Ok(NativeStream::opened(ptr))
        }
        None => Err(last_os_error("fdopen")),
    }
}

/// Flush and release a stream with `fclose`
///
/// The stream is released even when `fclose` reports an error (for example a
/// failed final flush).
///
/// # Errors
///
/// Returns `BackendError::Os` with the `errno` set by `fclose`.
pub fn close(stream: NativeStream) -> Result<()> {
    let mut stream = ManuallyDrop::new(stream);
    if let Some(err) = stream.take_deferred_error() {
        trace!("discarding deferred error on close: {err}");
    }
    // SAFETY: the stream is live and ManuallyDrop prevents a second fclose.
    let rc = unsafe { libc::fclose(stream.as_ptr()) };
    let result = if rc == 0 {
        Ok(())
    } else {
        Err(last_os_error("fclose"))
    };
    if stream.tracked {
        tracker::stream_closed();
    }
    trace!("fclose({:p}) -> {rc}", stream.ptr);
    result
}

/// Descriptor underlying a stream, as reported by `fileno`
///
/// Returns -1 if the stream has no descriptor.
#[must_use]
pub fn descriptor_of(stream: &NativeStream) -> RawFd {
    // SAFETY: the stream is live for the lifetime of the borrow.
    unsafe { libc::fileno(stream.as_ptr()) }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::os::unix::io::IntoRawFd;
    use tempfile::TempDir;

    #[test]
    fn test_open_by_path_and_close() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("open.txt");

        let stream = open_by_path(&path, "w").unwrap();
        assert!(descriptor_of(&stream) >= 0);
        close(stream).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_missing_file_reports_enoent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let err = open_by_path(&path, "r").unwrap_err();
        assert_eq!(err.errno(), libc::ENOENT);
        assert_eq!(err.op(), "fopen");
    }

    #[test]
    fn test_open_rejects_nul_in_mode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nul.txt");

        let err = open_by_path(&path, "w\0").unwrap_err();
        assert_eq!(err.errno(), libc::EINVAL);
        assert!(!path.exists());
    }

    #[test]
    fn test_adopt_descriptor_keeps_fd() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("adopt.txt");
        std::fs::write(&path, b"adopted").unwrap();

        let fd = std::fs::File::open(&path).unwrap().into_raw_fd();
        let stream = adopt_descriptor(fd, "r").unwrap();
        assert_eq!(descriptor_of(&stream), fd);
        close(stream).unwrap();
    }

    #[test]
    fn test_adopt_invalid_descriptor_fails() {
        let err = adopt_descriptor(-1, "r").unwrap_err();
        assert_eq!(err.errno(), libc::EBADF);
        assert_eq!(err.op(), "fdopen");
    }

    #[test]
    fn test_debug_shows_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("debug.txt");

        let stream = open_by_path(&path, "w").unwrap();
        let text = format!("{stream:?}");
        assert!(text.contains("NativeStream"));
        assert!(text.contains(&descriptor_of(&stream).to_string()));
        close(stream).unwrap();
    }
}

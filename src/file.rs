//! Owned buffered file handle
//!
//! A [`File`] wraps exactly one [`NativeStream`] together with a display path
//! and the mode string it was opened with. The stream is released exactly
//! once: by [`File::close`], or on drop if the caller never closed it.
//!
//! # Lifecycle
//!
//! ```text
//! open/fdopen ──► File (open) ──close()/drop──► File (closed)
//!                    │                              │
//!                    └─ read/readline/write/flush   └─ every I/O method: BadFileDescriptor
//! ```
//!
//! Closing is one-way; a closed handle is never reopened in place.

use crate::buffering::Buffering;
use crate::error::{FileError, Result};
use std::fmt;
use std::io::{self, SeekFrom};
use std::os::unix::io::RawFd;
use std::sync::{Mutex, MutexGuard, PoisonError};
use stdio_backend::NativeStream;
use tracing::{debug, trace};

/// Read bound used when no size, or a zero size, is requested
pub const DEFAULT_READ_SIZE: usize = 4096;

/// Resolve a caller-supplied read bound
///
/// Absent, zero, negative and out-of-range (beyond `u32`) requests all fall
/// back to [`DEFAULT_READ_SIZE`]; a zero request never means "read nothing".
#[must_use]
pub fn resolve_read_size(requested: Option<i64>) -> usize {
    requested
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n != 0)
        .map_or(DEFAULT_READ_SIZE, |n| n as usize)
}

/// Buffered file handle over a C stdio stream
///
/// Mutating operations take `&mut self`: one handle is driven by one caller at
/// a time. Wrap it in a mutex (or use [`SharedFile`](crate::offload::SharedFile))
/// to share it.
///
/// # Examples
///
/// ```rust,no_run
/// use stdio_file::open;
///
/// # fn example() -> stdio_file::Result<()> {
/// let mut out = open("/tmp/t.txt", "w", None)?;
/// assert_eq!(out.write(b"hello")?, 5);
/// out.flush()?;
/// out.close()?;
///
/// let mut input = open("/tmp/t.txt", "r", None)?;
/// assert_eq!(input.read(Some(10))?, b"hello");
/// # Ok(())
/// # }
/// ```
pub struct File {
    /// Display identifier (may be synthetic, e.g. `<stdin>`)
    path: String,
    /// Mode string the stream was opened with; informational only
    mode: String,
    /// The owned stream; `None` once closed
    native: Option<NativeStream>,
}

impl File {
    /// Wrap an already-open native stream
    ///
    /// # Arguments
    ///
    /// * `path` - Display identifier for the handle
    /// * `native` - The stream this handle takes exclusive ownership of
    /// * `mode` - Mode string the stream was opened with
    /// * `buffering` - `None`/`-1` keeps the default, `0` unbuffered, `1` line-buffered
    ///
    /// # Errors
    ///
    /// Returns `FileError::InvalidArgument` for any other buffering value, after
    /// closing `native`. Returns `FileError::Backend` if `setvbuf` fails; the
    /// stream is released in that case too.
    pub fn new(
        path: impl Into<String>,
        native: NativeStream,
        mode: impl Into<String>,
        buffering: Option<i32>,
    ) -> Result<Self> {
        let mut file = Self::from_stream(path, native, mode);

        let Some(raw) = buffering else {
            return Ok(file);
        };
        let buffering = match Buffering::try_from(raw) {
            Ok(buffering) => buffering,
            Err(err) => {
                // Release the stream before reporting; close errors are secondary here
                let _ = file.close();
                return Err(err);
            }
        };
        if let Some(mode) = buffering.backend_mode() {
            let stream = file.stream_mut()?;
            stdio_backend::set_buffering_mode(stream, mode)?;
        }
        Ok(file)
    }

    /// Wrap a stream without touching its buffering
    pub(crate) fn from_stream(
        path: impl Into<String>,
        native: NativeStream,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mode: mode.into(),
            native: Some(native),
        }
    }

    /// A handle that starts out closed
    pub(crate) fn detached(path: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: mode.into(),
            native: None,
        }
    }

    /// Display identifier given at construction
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Mode string given at construction
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Whether the handle has been closed
    #[must_use]
    pub fn closed(&self) -> bool {
        self.native.is_none()
    }

    /// Underlying descriptor, or -1 once closed
    #[must_use]
    pub fn fd(&self) -> RawFd {
        self.native.as_ref().map_or(-1, stdio_backend::descriptor_of)
    }

    fn stream(&self) -> Result<&NativeStream> {
        self.native.as_ref().ok_or_else(FileError::bad_file_descriptor)
    }

    fn stream_mut(&mut self) -> Result<&mut NativeStream> {
        self.native.as_mut().ok_or_else(FileError::bad_file_descriptor)
    }

    /// Read up to `max_bytes` bytes (4096 when `None` or zero)
    ///
    /// Returns fewer bytes than requested near end-of-stream, and an empty
    /// buffer at end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `fread` fails.
    pub fn read(&mut self, max_bytes: Option<u32>) -> Result<Vec<u8>> {
        let max = resolve_read_size(max_bytes.map(i64::from));
        let data = stdio_backend::read(self.stream_mut()?, max)?;
        trace!(path = %self.path, max, got = data.len(), "read");
        Ok(data)
    }

    /// Read one line of at most `max_bytes` bytes (4096 when `None` or zero)
    ///
    /// The terminator is included when it falls within the bound; an empty
    /// buffer means end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `fgets` fails.
    pub fn readline(&mut self, max_bytes: Option<u32>) -> Result<Vec<u8>> {
        let max = resolve_read_size(max_bytes.map(i64::from));
        let line = stdio_backend::read_line(self.stream_mut()?, max)?;
        trace!(path = %self.path, max, got = line.len(), "readline");
        Ok(line)
    }

    /// Buffer `data` for writing and return the number of bytes accepted
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `fwrite` fails.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let written = stdio_backend::write(self.stream_mut()?, data)?;
        trace!(path = %self.path, len = data.len(), written, "write");
        Ok(written)
    }

    /// Push buffered writes toward the device
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `fflush` fails.
    pub fn flush(&mut self) -> Result<()> {
        stdio_backend::flush(self.stream_mut()?)?;
        trace!(path = %self.path, "flush");
        Ok(())
    }

    /// Reposition the stream, returning the new absolute offset
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `fseeko` fails (e.g. on a pipe).
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(stdio_backend::seek(self.stream_mut()?, pos)?)
    }

    /// Current absolute stream position
    ///
    /// # Errors
    ///
    /// Returns `FileError::BadFileDescriptor` if the handle is closed, or the
    /// backend error if `ftello` fails.
    pub fn tell(&self) -> Result<u64> {
        Ok(stdio_backend::tell(self.stream()?)?)
    }

    /// Release the native stream
    ///
    /// Idempotent: closing a closed handle does nothing. The handle counts as
    /// closed even if the backend reports an error while releasing.
    ///
    /// # Errors
    ///
    /// Returns the backend error if `fclose` fails (typically a failed final flush).
    pub fn close(&mut self) -> Result<()> {
        let Some(native) = self.native.take() else {
            return Ok(());
        };
        debug!(path = %self.path, "closing file");
        stdio_backend::close(native)?;
        Ok(())
    }
}

impl Drop for File {
    fn drop(&mut self) {
        if self.closed() {
            return;
        }
        debug!(path = %self.path, "releasing unclosed file on drop");
        if let Err(e) = self.close() {
            debug!(path = %self.path, error = %e, "close on drop failed");
        }
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("fd", &self.fd())
            .field("closed", &self.closed())
            .finish()
    }
}

impl io::Read for File {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let stream = self.stream_mut()?;
        Ok(stdio_backend::read_into(stream, buf).map_err(FileError::from)?)
    }
}

impl io::Write for File {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(File::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(File::flush(self)?)
    }
}

impl io::Seek for File {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(File::seek(self, pos)?)
    }
}

/// Lock a shared handle, recovering it if a previous holder panicked
///
/// A panic while holding the lock cannot leave a `File` half-updated: its
/// only mutable state is the `Option` taken by `close`.
pub(crate) fn lock_file(file: &Mutex<File>) -> MutexGuard<'_, File> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

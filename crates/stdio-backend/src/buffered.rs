//! Buffered byte I/O: `fread`, `fgets`, `fwrite`, `fflush`
//!
//! All functions block until the C library returns. A short count is not an
//! error by itself; only a set stream error indicator is reported, after
//! which the indicator is cleared so the stream stays usable.

use crate::error::{last_os_error, BackendError, Result};
use crate::stream::NativeStream;
use log::trace;

/// Capture `errno` for a failed primitive and clear the stream's error indicator
fn stream_error(stream: &mut NativeStream, op: &'static str) -> BackendError {
    let err = last_os_error(op);
    // SAFETY: the stream is live for the lifetime of the borrow.
    unsafe { libc::clearerr(stream.as_ptr()) };
    err
}

/// Whether the stream's error indicator is set
fn has_error(stream: &NativeStream) -> bool {
    // SAFETY: the stream is live for the lifetime of the borrow.
    unsafe { libc::ferror(stream.as_ptr()) != 0 }
}

/// Read up to `buf.len()` bytes into `buf` with `fread`
///
/// Returns the number of bytes read; 0 means end-of-stream (or an empty `buf`).
/// A failure after some bytes were transferred returns those bytes and is
/// reported by the next call instead.
///
/// # Errors
///
/// Returns `BackendError::Os` if the stream's error indicator was set by this
/// read before any byte arrived, or by an earlier short read.
pub fn read_into(stream: &mut NativeStream, buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() {
        return Ok(0);
    }
    if let Some(err) = stream.take_deferred_error() {
        return Err(err);
    }

    // SAFETY: `buf` is valid for `buf.len()` writable bytes.
    let n = unsafe { libc::fread(buf.as_mut_ptr().cast(), 1, buf.len(), stream.as_ptr()) };
    if n < buf.len() && has_error(stream) {
        let err = stream_error(stream, "fread");
        if n == 0 {
            return Err(err);
        }
        trace!("fread({:p}) failed after {n} bytes, deferring: {err}", stream.as_ptr());
        stream.defer_error(err);
    }
    trace!("fread({:p}, {}) -> {n}", stream.as_ptr(), buf.len());
    Ok(n)
}

/// Read up to `max` bytes with `fread` into a new buffer
///
/// The returned buffer holds exactly the bytes read, which may be fewer than
/// `max` (including none at end-of-stream).
///
/// # Errors
///
/// Returns `BackendError::Os` if the read fails.
pub fn read(stream: &mut NativeStream, max: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; max];
    let n = read_into(stream, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Read one line of at most `max` bytes with `fgets`
///
/// The line terminator is included when it fits within `max`. Returns an
/// empty buffer at end-of-stream. Embedded NUL bytes are kept.
///
/// # Errors
///
/// Returns `BackendError::Os` if the read fails, or the failure held back by
/// an earlier short [`read_into`].
pub fn read_line(stream: &mut NativeStream, max: usize) -> Result<Vec<u8>> {
    if max == 0 {
        return Ok(Vec::new());
    }
    if let Some(err) = stream.take_deferred_error() {
        return Err(err);
    }

    // fgets stores at most size - 1 bytes plus the terminating NUL.
    let size = max.saturating_add(1).min(libc::c_int::MAX as usize);
    // fgets reports no length; prefill with non-zero bytes so the last NUL
    // in the buffer is the one it appended.
    let mut buf = vec![0xFFu8; size];

    // SAFETY: `buf` is valid for `size` writable bytes and `size` fits in c_int.
    let ret = unsafe {
        libc::fgets(
            buf.as_mut_ptr().cast(),
            size as libc::c_int,
            stream.as_ptr(),
        )
    };
    if ret.is_null() {
        if has_error(stream) {
            return Err(stream_error(stream, "fgets"));
        }
        return Ok(Vec::new());
    }

    let len = buf.iter().rposition(|&b| b == 0).unwrap_or(size - 1);
    buf.truncate(len);
    trace!("fgets({:p}, {size}) -> {len}", stream.as_ptr());
    Ok(buf)
}

/// Write `data` into the stream's buffer with `fwrite`
///
/// Returns the number of bytes accepted; they are not necessarily on the
/// device until [`flush`] or [`close`](crate::close).
///
/// # Errors
///
/// Returns `BackendError::Os` if the write fails (e.g. `EBADF` on a read-only stream).
pub fn write(stream: &mut NativeStream, data: &[u8]) -> Result<usize> {
    if data.is_empty() {
        return Ok(0);
    }

    // SAFETY: `data` is valid for `data.len()` readable bytes.
    let n = unsafe { libc::fwrite(data.as_ptr().cast(), 1, data.len(), stream.as_ptr()) };
    if n < data.len() && has_error(stream) {
        return Err(stream_error(stream, "fwrite"));
    }
    trace!("fwrite({:p}, {}) -> {n}", stream.as_ptr(), data.len());
    Ok(n)
}

/// Push buffered output toward the device with `fflush`
///
/// # Errors
///
/// Returns `BackendError::Os` with the `errno` set by `fflush`.
pub fn flush(stream: &mut NativeStream) -> Result<()> {
    // SAFETY: the stream is live for the lifetime of the borrow.
    if unsafe { libc::fflush(stream.as_ptr()) } != 0 {
        return Err(stream_error(stream, "fflush"));
    }
    Ok(())
}

//! Stream positioning with `fseeko` / `ftello`
//!
//! Repositioning also discards any pushed-back input and clears the
//! end-of-file indicator, which makes it the portable way to switch between
//! writing and reading on an update (`"+"`) stream.

use crate::error::{last_os_error, os_error, Result};
use crate::stream::NativeStream;
use std::io::SeekFrom;

/// Move the stream position and return the new absolute offset
///
/// # Errors
///
/// Returns `BackendError::Os` if the offset does not fit in `off_t` (`EINVAL`),
/// or with the `errno` set by `fseeko` (e.g. `ESPIPE` on a pipe).
pub fn seek(stream: &mut NativeStream, pos: SeekFrom) -> Result<u64> {
    let (offset, whence) = match pos {
        SeekFrom::Start(offset) => (
            libc::off_t::try_from(offset).map_err(|_| os_error("fseeko", libc::EINVAL))?,
            libc::SEEK_SET,
        ),
        SeekFrom::Current(offset) => (offset as libc::off_t, libc::SEEK_CUR),
        SeekFrom::End(offset) => (offset as libc::off_t, libc::SEEK_END),
    };

    // SAFETY: the stream is live for the lifetime of the borrow.
    if unsafe { libc::fseeko(stream.as_ptr(), offset, whence) } != 0 {
        return Err(last_os_error("fseeko"));
    }
    tell(stream)
}

/// Current absolute stream position
///
/// # Errors
///
/// Returns `BackendError::Os` with the `errno` set by `ftello`.
pub fn tell(stream: &NativeStream) -> Result<u64> {
    // SAFETY: the stream is live for the lifetime of the borrow.
    let pos = unsafe { libc::ftello(stream.as_ptr()) };
    u64::try_from(pos).map_err(|_| last_os_error("ftello"))
}

//! Factory functions: open by path, or adopt an existing descriptor

use crate::error::Result;
use crate::file::File;
use std::os::unix::io::RawFd;
use std::path::Path;
use tracing::debug;

/// Open `path` with an `fopen` mode string
///
/// The handle's display path is `path` as given (lossily converted to UTF-8).
///
/// # Arguments
///
/// * `path` - File to open
/// * `mode` - `fopen` mode (`"r"`, `"w"`, `"a"`, `"r+"`, `"w+"`, `"a+"`)
/// * `buffering` - `None`/`-1` default, `0` unbuffered, `1` line-buffered
///
/// # Errors
///
/// Returns `FileError::Backend` unchanged if `fopen` fails (no handle is
/// created), or any error from [`File::new`].
pub fn open(path: impl AsRef<Path>, mode: &str, buffering: Option<i32>) -> Result<File> {
    let path = path.as_ref();
    let native = stdio_backend::open_by_path(path, mode)?;
    debug!(path = %path.display(), mode, "opened file");
    File::new(path.to_string_lossy(), native, mode, buffering)
}

/// Adopt an open descriptor as a buffered handle
///
/// On success the returned handle owns the descriptor and closes it on
/// [`File::close`]. On failure the descriptor is left open and still belongs
/// to the caller.
///
/// # Arguments
///
/// * `fd` - Open descriptor whose access mode is compatible with `mode`
/// * `mode` - `fdopen` mode string
/// * `path` - Display label for the handle (e.g. `"<pipe>"`)
/// * `buffering` - `None`/`-1` default, `0` unbuffered, `1` line-buffered
///
/// # Errors
///
/// Returns `FileError::Backend` unchanged if `fdopen` fails, or any error
/// from [`File::new`] (which closes the adopted descriptor).
pub fn fdopen(
    fd: RawFd,
    mode: &str,
    path: impl Into<String>,
    buffering: Option<i32>,
) -> Result<File> {
    let native = stdio_backend::adopt_descriptor(fd, mode)?;
    let path = path.into();
    debug!(fd, path = %path, mode, "adopted descriptor");
    File::new(path, native, mode, buffering)
}

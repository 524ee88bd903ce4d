//! Stream buffering control with `setvbuf`

use crate::error::{last_os_error, Result};
use crate::stream::NativeStream;
use log::trace;

/// Buffering discipline for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferMode {
    /// Block buffering (`_IOFBF`)
    Full,
    /// Flush on newline (`_IOLBF`)
    Line,
    /// Every write goes straight to the descriptor (`_IONBF`)
    Unbuffered,
}

impl BufferMode {
    /// Convert to the C library constant
    fn to_libc(self) -> libc::c_int {
        match self {
            Self::Full => libc::_IOFBF,
            Self::Line => libc::_IOLBF,
            Self::Unbuffered => libc::_IONBF,
        }
    }
}

/// Change a stream's buffering discipline
///
/// Must be called before any other I/O on the stream. The C library
/// allocates and owns the buffer.
///
/// # Errors
///
/// Returns `BackendError::Os` if `setvbuf` rejects the request.
pub fn set_buffering_mode(stream: &mut NativeStream, mode: BufferMode) -> Result<()> {
    // SAFETY: the stream is live; a null buffer lets the C library allocate one.
    let rc = unsafe { libc::setvbuf(stream.as_ptr(), std::ptr::null_mut(), mode.to_libc(), 0) };
    if rc != 0 {
        return Err(last_os_error("setvbuf"));
    }
    trace!("setvbuf({:p}, {mode:?})", stream.as_ptr());
    Ok(())
}

//! Error taxonomy for file handle operations
//!
//! Every failure carries an errno-style code ([`FileError::errno`]) and a
//! human-readable message. Backend failures pass through unchanged.

use stdio_backend::{strerror, BackendError};
use thiserror::Error;

/// Result alias for file handle operations
pub type Result<T> = std::result::Result<T, FileError>;

/// Errors raised by [`File`](crate::File) and the factory functions
#[derive(Debug, Error)]
pub enum FileError {
    /// An I/O method was called on a closed handle
    #[error("[Errno {code}] {message}")]
    BadFileDescriptor {
        /// Always `EBADF`
        code: i32,
        /// Platform message for `EBADF`
        message: String,
    },

    /// An unrecognised buffering value was passed at construction
    #[error("invalid value for \"buffering\": {0}")]
    InvalidArgument(i32),

    /// The native stream primitive failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A blocking operation could not be joined from the blocking pool
    #[error("blocking task failed: {0}")]
    Offload(String),
}

impl FileError {
    /// The error raised for I/O on a closed handle
    #[must_use]
    pub fn bad_file_descriptor() -> Self {
        Self::BadFileDescriptor {
            code: libc::EBADF,
            message: strerror(libc::EBADF),
        }
    }

    /// The errno-style code for this error
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::BadFileDescriptor { code, .. } => *code,
            Self::InvalidArgument(_) => libc::EINVAL,
            Self::Backend(e) => e.errno(),
            Self::Offload(_) => libc::EIO,
        }
    }

    /// Whether this is the closed-handle error
    #[must_use]
    pub fn is_bad_file_descriptor(&self) -> bool {
        matches!(self, Self::BadFileDescriptor { .. })
    }
}

impl From<FileError> for std::io::Error {
    fn from(err: FileError) -> Self {
        let kind = std::io::Error::from_raw_os_error(err.errno()).kind();
        std::io::Error::new(kind, err)
    }
}

//! Error types for buffered stream primitives

use thiserror::Error;

/// Result alias used throughout this crate
pub type Result<T> = std::result::Result<T, BackendError>;

/// Failure reported by a C library stream primitive
#[derive(Debug, Error)]
pub enum BackendError {
    /// The primitive failed and set `errno`
    #[error("{op} failed: [Errno {code}] {message}")]
    Os {
        /// Name of the C function that failed (e.g. `"fopen"`)
        op: &'static str,
        /// Raw `errno` value captured right after the failure
        code: i32,
        /// Platform message for `code`
        message: String,
    },

    /// A path or mode string could not be passed to C because it contains a NUL byte
    #[error("{op} failed: argument contains an interior NUL byte")]
    Nul {
        /// Name of the C function that was about to be called
        op: &'static str,
    },
}

impl BackendError {
    /// The errno-style code for this failure
    ///
    /// `Nul` failures never reached the C library and report `EINVAL`.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::Os { code, .. } => *code,
            Self::Nul { .. } => libc::EINVAL,
        }
    }

    /// Name of the primitive that failed
    #[must_use]
    pub fn op(&self) -> &'static str {
        match self {
            Self::Os { op, .. } | Self::Nul { op } => op,
        }
    }
}

/// Platform message for an errno value, without the `(os error N)` suffix
#[must_use]
pub fn strerror(code: i32) -> String {
    let text = std::io::Error::from_raw_os_error(code).to_string();
    match text.rfind(" (os error ") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}

/// Build an `Os` error from an explicit code
pub(crate) fn os_error(op: &'static str, code: i32) -> BackendError {
    BackendError::Os {
        op,
        code,
        message: strerror(code),
    }
}

/// Build an `Os` error from the current `errno`
///
/// Must be called immediately after the failing primitive. Some C libraries
/// leave `errno` at 0 for stream failures; those are reported as `EIO`.
pub(crate) fn last_os_error(op: &'static str) -> BackendError {
    let code = match std::io::Error::last_os_error().raw_os_error() {
        Some(code) if code != 0 => code,
        _ => libc::EIO,
    };
    os_error(op, code)
}

/// Build a `Nul` error
pub(crate) fn nul_error(op: &'static str) -> BackendError {
    BackendError::Nul { op }
}

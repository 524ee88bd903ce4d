//! The C runtime's pre-opened standard streams
//!
//! glibc and musl export them as `stdin`/`stdout`/`stderr`; the BSD family
//! (including macOS) exports `__stdinp`/`__stdoutp`/`__stderrp`.

use crate::stream::NativeStream;

extern "C" {
    #[cfg_attr(
        any(target_os = "macos", target_os = "ios", target_os = "freebsd"),
        link_name = "__stdinp"
    )]
    #[cfg_attr(
        not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")),
        link_name = "stdin"
    )]
    static C_STDIN: *mut libc::FILE;

    #[cfg_attr(
        any(target_os = "macos", target_os = "ios", target_os = "freebsd"),
        link_name = "__stdoutp"
    )]
    #[cfg_attr(
        not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")),
        link_name = "stdout"
    )]
    static C_STDOUT: *mut libc::FILE;

    #[cfg_attr(
        any(target_os = "macos", target_os = "ios", target_os = "freebsd"),
        link_name = "__stderrp"
    )]
    #[cfg_attr(
        not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")),
        link_name = "stderr"
    )]
    static C_STDERR: *mut libc::FILE;
}

/// Take ownership of the C runtime's `stdin` stream
///
/// Returns `None` if the runtime has no standard input stream.
///
/// # Safety
///
/// Must be called at most once per process, and nothing else may close the
/// C `stdin` stream while the returned handle is alive.
#[must_use]
pub unsafe fn standard_input() -> Option<NativeStream> {
    // SAFETY: reading the pointer value; ownership rules are on the caller.
    unsafe { NativeStream::from_raw(C_STDIN) }
}

/// Take ownership of the C runtime's `stdout` stream
///
/// # Safety
///
/// Same contract as [`standard_input`].
#[must_use]
pub unsafe fn standard_output() -> Option<NativeStream> {
    // SAFETY: reading the pointer value; ownership rules are on the caller.
    unsafe { NativeStream::from_raw(C_STDOUT) }
}

/// Take ownership of the C runtime's `stderr` stream
///
/// # Safety
///
/// Same contract as [`standard_input`].
#[must_use]
pub unsafe fn standard_error() -> Option<NativeStream> {
    // SAFETY: reading the pointer value; ownership rules are on the caller.
    unsafe { NativeStream::from_raw(C_STDERR) }
}

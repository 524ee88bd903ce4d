//! Process-wide handles for the three standard streams
//!
//! Each handle wraps the C runtime's pre-opened stream with a fixed display
//! label and mode:
//!
//! | accessor   | path         | mode  |
//! |------------|--------------|-------|
//! | [`stdin`]  | `<stdin>`    | `"r"` |
//! | [`stdout`] | `<stdout>`   | `"w"` |
//! | [`stderr`] | `<stderr>`   | `"w"` |
//!
//! They are built once, on first access (or by [`init`]), and live until the
//! process exits. Closing one is allowed; it stays closed for the rest of the
//! process and further I/O on it reports `BadFileDescriptor`.

use crate::file::{lock_file, File};
use std::sync::{LazyLock, Mutex, MutexGuard};
use stdio_backend::NativeStream;
use tracing::debug;

static STDIN: LazyLock<StandardStream> = LazyLock::new(|| {
    // SAFETY: this is the only place the C stdin stream is taken.
    StandardStream::new("<stdin>", unsafe { stdio_backend::standard_input() }, "r")
});

static STDOUT: LazyLock<StandardStream> = LazyLock::new(|| {
    // SAFETY: this is the only place the C stdout stream is taken.
    StandardStream::new("<stdout>", unsafe { stdio_backend::standard_output() }, "w")
});

static STDERR: LazyLock<StandardStream> = LazyLock::new(|| {
    // SAFETY: this is the only place the C stderr stream is taken.
    StandardStream::new("<stderr>", unsafe { stdio_backend::standard_error() }, "w")
});

/// A standard stream shared by the whole process
///
/// Access goes through [`StandardStream::lock`], which hands out the
/// underlying [`File`] to one caller at a time.
#[derive(Debug)]
pub struct StandardStream {
    /// Fixed display label, readable without taking the lock
    path: &'static str,
    /// Fixed mode string, readable without taking the lock
    mode: &'static str,
    /// The shared handle
    file: Mutex<File>,
}

impl StandardStream {
    fn new(path: &'static str, native: Option<NativeStream>, mode: &'static str) -> Self {
        let file = match native {
            Some(native) => File::from_stream(path, native, mode),
            None => {
                debug!(path, "C runtime has no stream; handle starts closed");
                File::detached(path, mode)
            }
        };
        Self {
            path,
            mode,
            file: Mutex::new(file),
        }
    }

    /// Exclusive access to the underlying handle
    ///
    /// Blocks while another caller holds the lock. The lock is not
    /// reentrant: while a guard is alive on this thread, query the guard
    /// (`guard.closed()`, `guard.fd()`) rather than [`closed`](Self::closed)
    /// or [`fd`](Self::fd), which would deadlock.
    ///
    /// ```
    /// let mut out = stdio_file::stdout().lock();
    /// if !out.closed() {
    ///     out.write(b"")?;
    /// }
    /// # Ok::<(), stdio_file::FileError>(())
    /// ```
    pub fn lock(&self) -> MutexGuard<'_, File> {
        lock_file(&self.file)
    }

    /// Fixed display label (`<stdin>`, `<stdout>` or `<stderr>`)
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Fixed mode string
    #[must_use]
    pub fn mode(&self) -> &'static str {
        self.mode
    }

    /// Whether the stream has been closed
    ///
    /// Takes the lock briefly. Deadlocks if this thread already holds a
    /// guard from [`lock`](Self::lock); use the guard's `closed()` there.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.lock().closed()
    }

    /// Underlying descriptor, or -1 once closed
    ///
    /// Takes the lock briefly, with the same restriction as
    /// [`closed`](Self::closed).
    #[must_use]
    pub fn fd(&self) -> std::os::unix::io::RawFd {
        self.lock().fd()
    }
}

/// The `<stdin>` handle
#[must_use]
pub fn stdin() -> &'static StandardStream {
    &STDIN
}

/// The `<stdout>` handle
#[must_use]
pub fn stdout() -> &'static StandardStream {
    &STDOUT
}

/// The `<stderr>` handle
#[must_use]
pub fn stderr() -> &'static StandardStream {
    &STDERR
}

/// Build all three standard handles now instead of on first use
pub fn init() {
    LazyLock::force(&STDIN);
    LazyLock::force(&STDOUT);
    LazyLock::force(&STDERR);
}

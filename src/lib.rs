//! # stdio-file
//!
//! Owned buffered file handles over the C library's stdio streams.
//!
//! - [`open`] and [`fdopen`] create a [`File`] from a path or an existing descriptor
//! - [`File`] exposes `read`, `readline`, `write`, `flush`, `seek` and `close`,
//!   plus the read-only `path`, `fd`, `mode` and `closed` accessors
//! - [`stdin`], [`stdout`] and [`stderr`] are process-wide handles for the
//!   standard streams
//! - [`offload::SharedFile`] runs the same operations on compio's blocking pool
//!
//! Every handle releases its stream exactly once: on [`File::close`], or on
//! drop if it was never closed. Closed handles fail every I/O call with
//! [`FileError::BadFileDescriptor`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use stdio_file::{open, stdout};
//!
//! # fn example() -> stdio_file::Result<()> {
//! let mut input = open("notes.txt", "r", None)?;
//! let mut out = stdout().lock();
//! loop {
//!     let line = input.readline(None)?;
//!     if line.is_empty() {
//!         break;
//!     }
//!     out.write(&line)?;
//! }
//! out.flush()?;
//! input.close()?;
//! # Ok(())
//! # }
//! ```

pub mod buffering;
pub mod cli;
pub mod error;
pub mod file;
pub mod offload;
pub mod open;
pub mod standard;

// Re-export main types
pub use buffering::Buffering;
pub use error::{FileError, Result};
pub use file::{resolve_read_size, File, DEFAULT_READ_SIZE};
pub use open::{fdopen, open};
pub use standard::{stderr, stdin, stdout, StandardStream};

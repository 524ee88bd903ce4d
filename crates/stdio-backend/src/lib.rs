//! # stdio-backend
//!
//! Owned, safe wrappers over the C library's buffered stream primitives:
//! - `fopen` / `fdopen` for opening by path or adopting a descriptor
//! - `fread` / `fgets` / `fwrite` / `fflush` for buffered byte I/O
//! - `fclose` for release
//! - `fileno`, `setvbuf`, `fseeko` / `ftello` for stream control
//! - the C runtime's pre-opened `stdin`, `stdout` and `stderr` streams
//!
//! Every stream is represented by a [`NativeStream`], an owned token for one
//! live `FILE *`. [`close`] consumes the token, so a stream can never be
//! released twice through this crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stdio_backend::{close, open_by_path, read, write};
//! use std::path::Path;
//!
//! # fn example() -> stdio_backend::Result<()> {
//! let mut out = open_by_path(Path::new("/tmp/hello.txt"), "w")?;
//! write(&mut out, b"hello")?;
//! close(out)?;
//!
//! let mut input = open_by_path(Path::new("/tmp/hello.txt"), "r")?;
//! assert_eq!(read(&mut input, 16)?, b"hello");
//! close(input)?;
//! # Ok(())
//! # }
//! ```
//!
//! This crate is Unix-only: it relies on `fdopen`, `fileno` and `fseeko`.

pub mod buffered;
pub mod buffering;
pub mod error;
pub mod seek;
pub mod standard;
pub mod stream;
pub mod tracker;

// Re-export main types
pub use buffered::{flush, read, read_into, read_line, write};
pub use buffering::{set_buffering_mode, BufferMode};
pub use error::{strerror, BackendError, Result};
pub use seek::{seek, tell};
pub use standard::{standard_error, standard_input, standard_output};
pub use stream::{adopt_descriptor, close, descriptor_of, open_by_path, NativeStream};
pub use tracker::open_stream_count;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

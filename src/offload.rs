//! Running blocking handle operations from async code
//!
//! Every [`File`] operation blocks the calling thread. On a single-threaded
//! async runtime that would stall the event loop, so [`SharedFile`] moves each
//! call onto compio's blocking thread pool and awaits the result. The handle
//! itself is unchanged: same errors, same closed-state rules.
//!
//! # Example
//!
//! ```rust,no_run
//! use stdio_file::offload::SharedFile;
//!
//! # async fn example() -> stdio_file::Result<()> {
//! let file = SharedFile::open("/tmp/log.txt", "a", None).await?;
//! file.write(b"line\n".to_vec()).await?;
//! file.close().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{FileError, Result};
use crate::file::{lock_file, File};
use std::io::SeekFrom;
use std::os::unix::io::RawFd;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Run `operation` on the blocking pool and wait for it
async fn offload<T, F>(operation: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    compio::runtime::spawn_blocking(operation)
        .await
        .map_err(|e| FileError::Offload(format!("spawn_blocking failed: {e:?}")))?
}

/// A [`File`] shared between async tasks
///
/// Clones refer to the same handle. Operations are serialized by an internal
/// mutex and each runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct SharedFile {
    inner: Arc<Mutex<File>>,
}

impl SharedFile {
    /// Share an existing handle
    #[must_use]
    pub fn new(file: File) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }

    /// Open `path` on the blocking pool
    ///
    /// # Errors
    ///
    /// Same as [`open`](crate::open), plus `FileError::Offload` if the
    /// blocking task cannot be joined.
    pub async fn open(
        path: impl Into<PathBuf>,
        mode: impl Into<String>,
        buffering: Option<i32>,
    ) -> Result<Self> {
        let path = path.into();
        let mode = mode.into();
        let file = offload(move || crate::open(&path, &mode, buffering)).await?;
        Ok(Self::new(file))
    }

    /// Run `operation` against the locked handle on the blocking pool
    async fn with_file<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut File) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        offload(move || {
            let mut file = lock_file(&inner);
            operation(&mut *file)
        })
        .await
    }

    /// See [`File::read`]
    ///
    /// # Errors
    ///
    /// Same as [`File::read`], plus `FileError::Offload`.
    pub async fn read(&self, max_bytes: Option<u32>) -> Result<Vec<u8>> {
        self.with_file(move |file| file.read(max_bytes)).await
    }

    /// See [`File::readline`]
    ///
    /// # Errors
    ///
    /// Same as [`File::readline`], plus `FileError::Offload`.
    pub async fn readline(&self, max_bytes: Option<u32>) -> Result<Vec<u8>> {
        self.with_file(move |file| file.readline(max_bytes)).await
    }

    /// See [`File::write`]; takes ownership of the data for the pool thread
    ///
    /// # Errors
    ///
    /// Same as [`File::write`], plus `FileError::Offload`.
    pub async fn write(&self, data: Vec<u8>) -> Result<usize> {
        self.with_file(move |file| file.write(&data)).await
    }

    /// See [`File::flush`]
    ///
    /// # Errors
    ///
    /// Same as [`File::flush`], plus `FileError::Offload`.
    pub async fn flush(&self) -> Result<()> {
        self.with_file(File::flush).await
    }

    /// See [`File::seek`]
    ///
    /// # Errors
    ///
    /// Same as [`File::seek`], plus `FileError::Offload`.
    pub async fn seek(&self, pos: SeekFrom) -> Result<u64> {
        self.with_file(move |file| file.seek(pos)).await
    }

    /// See [`File::close`]
    ///
    /// # Errors
    ///
    /// Same as [`File::close`], plus `FileError::Offload`.
    pub async fn close(&self) -> Result<()> {
        self.with_file(File::close).await
    }

    /// Display path of the shared handle
    #[must_use]
    pub fn path(&self) -> String {
        lock_file(&self.inner).path().to_string()
    }

    /// Mode string of the shared handle
    #[must_use]
    pub fn mode(&self) -> String {
        lock_file(&self.inner).mode().to_string()
    }

    /// Whether the shared handle has been closed
    #[must_use]
    pub fn closed(&self) -> bool {
        lock_file(&self.inner).closed()
    }

    /// Underlying descriptor, or -1 once closed
    #[must_use]
    pub fn fd(&self) -> RawFd {
        lock_file(&self.inner).fd()
    }
}

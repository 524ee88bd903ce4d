//! Buffering modes accepted at handle construction
//!
//! The integer contract is `-1` (C library default), `0` (unbuffered) and
//! `1` (line-buffered). Anything else is rejected.

use crate::error::FileError;
use stdio_backend::BufferMode;

/// Buffering requested for a newly constructed handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Buffering {
    /// Keep whatever the C library chose for the stream
    #[default]
    Default,
    /// Every write goes straight to the descriptor
    Unbuffered,
    /// Output is flushed at each newline
    LineBuffered,
}

impl Buffering {
    /// The integer form of this mode
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Default => -1,
            Self::Unbuffered => 0,
            Self::LineBuffered => 1,
        }
    }

    /// The `setvbuf` mode to apply, if any
    #[must_use]
    pub(crate) const fn backend_mode(self) -> Option<BufferMode> {
        match self {
            Self::Default => None,
            Self::Unbuffered => Some(BufferMode::Unbuffered),
            Self::LineBuffered => Some(BufferMode::Line),
        }
    }
}

impl TryFrom<i32> for Buffering {
    type Error = FileError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Default),
            0 => Ok(Self::Unbuffered),
            1 => Ok(Self::LineBuffered),
            other => Err(FileError::InvalidArgument(other)),
        }
    }
}

impl From<Buffering> for i32 {
    fn from(mode: Buffering) -> Self {
        mode.as_raw()
    }
}

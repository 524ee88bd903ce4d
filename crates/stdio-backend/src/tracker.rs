//! Accounting of streams opened through this crate
//!
//! The counter covers streams created by [`open_by_path`](crate::open_by_path)
//! and [`adopt_descriptor`](crate::adopt_descriptor) that have not yet been
//! passed to [`close`](crate::close). The C runtime's standard streams are not
//! counted. It exists so callers can verify that no code path leaks a stream.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Live streams opened through this crate
static OPEN_STREAMS: AtomicUsize = AtomicUsize::new(0);

/// Number of streams opened through this crate and not yet closed
///
/// The counter is process-wide; concurrent opens and closes on other threads
/// are reflected immediately.
#[must_use]
pub fn open_stream_count() -> usize {
    OPEN_STREAMS.load(Ordering::SeqCst)
}

pub(crate) fn stream_opened() {
    OPEN_STREAMS.fetch_add(1, Ordering::SeqCst);
}

pub(crate) fn stream_closed() {
    OPEN_STREAMS.fetch_sub(1, Ordering::SeqCst);
}

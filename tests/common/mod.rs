use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub mod fixtures;

/// Scratch directory plus a path inside it that does not exist yet
#[allow(dead_code)]
pub fn scratch_path(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap_or_else(|e| panic!("Failed to create temp dir: {e}"));
    let path = temp_dir.path().join(name);
    (temp_dir, path)
}

/// Read a file fully with std, bypassing the handle layer
#[allow(dead_code)]
pub fn read_back(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

#[allow(dead_code)]
pub struct TestTimeoutGuard {
    cancelled: Arc<AtomicBool>,
}

impl Drop for TestTimeoutGuard {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Abort the whole test process if the guard is still alive after `duration`
///
/// Blocking stdio calls have no timeout of their own; this keeps a stuck
/// read from hanging CI.
#[allow(dead_code)]
pub fn test_timeout_guard(duration: Duration) -> TestTimeoutGuard {
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_clone = Arc::clone(&cancelled);
    std::thread::spawn(move || {
        std::thread::sleep(duration);
        if !cancelled_clone.load(Ordering::SeqCst) {
            eprintln!("Test timeout exceeded ({}s). Aborting.", duration.as_secs());
            std::process::abort();
        }
    });
    TestTimeoutGuard { cancelled }
}

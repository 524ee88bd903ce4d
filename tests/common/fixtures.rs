//! Fixture files for handle tests

use std::path::Path;

/// Three lines, the last one without a terminator
#[allow(dead_code)]
pub const LINES: &[u8] = b"alpha\nbeta\ngamma";

/// Write `contents` to `path` with std, bypassing the handle layer
#[allow(dead_code)]
pub fn write_fixture(path: &Path, contents: &[u8]) {
    std::fs::write(path, contents)
        .unwrap_or_else(|e| panic!("Failed to write fixture {}: {e}", path.display()));
}

/// Deterministic non-text payload of `len` bytes
#[allow(dead_code)]
pub fn binary_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

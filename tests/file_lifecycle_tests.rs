//! End-to-end handle lifecycle: open, I/O, close, and closed-state errors

#![allow(clippy::unwrap_used)]

mod common;

use common::fixtures::{binary_payload, write_fixture, LINES};
use common::{read_back, scratch_path};
use rstest::rstest;
use std::io::SeekFrom;
use std::os::unix::io::IntoRawFd;
use stdio_file::{fdopen, open, FileError, DEFAULT_READ_SIZE};

#[test]
fn test_write_flush_close_then_reopen_and_read() {
    let (_dir, path) = scratch_path("t.txt");

    let mut out = open(&path, "w", None).unwrap();
    assert_eq!(out.write(b"hello").unwrap(), 5);
    out.flush().unwrap();
    out.close().unwrap();

    let mut input = open(&path, "r", None).unwrap();
    assert_eq!(input.read(Some(10)).unwrap(), b"hello");
    assert!(input.read(Some(10)).unwrap().is_empty());
    input.close().unwrap();
}

#[rstest]
#[case("w")]
#[case("a")]
#[case("w+")]
#[case("a+")]
fn test_fresh_handle_is_open(#[case] mode: &str) {
    let (_dir, path) = scratch_path("fresh.txt");

    let mut file = open(&path, mode, None).unwrap();
    assert!(!file.closed());
    assert_eq!(file.mode(), mode);
    assert!(file.fd() >= 0);
    file.close().unwrap();
}

#[test]
fn test_double_close_is_harmless() {
    let (_dir, path) = scratch_path("twice.txt");

    let mut file = open(&path, "w", None).unwrap();
    file.close().unwrap();
    file.close().unwrap();
    assert!(file.closed());
}

#[test]
fn test_every_io_method_fails_after_close() {
    let (_dir, path) = scratch_path("closed.txt");

    let mut file = open(&path, "w+", None).unwrap();
    file.close().unwrap();

    assert_eq!(file.fd(), -1);
    for err in [
        file.read(None).unwrap_err(),
        file.readline(None).unwrap_err(),
        file.write(b"data").unwrap_err(),
        file.flush().unwrap_err(),
    ] {
        assert!(
            matches!(err, FileError::BadFileDescriptor { code, .. } if code == libc::EBADF),
            "unexpected error: {err:?}"
        );
    }
}

#[test]
fn test_read_without_size_and_with_zero_agree() {
    let (_dir, path) = scratch_path("sized.bin");
    write_fixture(&path, &binary_payload(3 * DEFAULT_READ_SIZE));

    let mut a = open(&path, "r", None).unwrap();
    let mut b = open(&path, "r", None).unwrap();
    loop {
        let from_default = a.read(None).unwrap();
        let from_zero = b.read(Some(0)).unwrap();
        assert_eq!(from_default, from_zero);
        assert!(from_default.len() <= DEFAULT_READ_SIZE);
        if from_default.is_empty() {
            break;
        }
    }
    a.close().unwrap();
    b.close().unwrap();
}

#[test]
fn test_round_trip_through_update_handle() {
    let (_dir, path) = scratch_path("update.bin");
    let payload = binary_payload(1000);

    let mut file = open(&path, "w+", None).unwrap();
    assert_eq!(file.write(&payload).unwrap(), payload.len());
    file.flush().unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert_eq!(file.read(Some(payload.len() as u32)).unwrap(), payload);
    file.close().unwrap();

    assert_eq!(read_back(&path), payload);
}

#[test]
fn test_readline_walks_lines() {
    let (_dir, path) = scratch_path("lines.txt");
    write_fixture(&path, LINES);

    let mut file = open(&path, "r", None).unwrap();
    assert_eq!(file.readline(None).unwrap(), b"alpha\n");
    assert_eq!(file.readline(None).unwrap(), b"beta\n");
    assert_eq!(file.readline(None).unwrap(), b"gamma");
    assert!(file.readline(None).unwrap().is_empty());
    file.close().unwrap();
}

#[test]
fn test_readline_keeps_bytes_after_nul() {
    let (_dir, path) = scratch_path("nul.bin");
    write_fixture(&path, b"ab\0cd\nnext\n");

    let mut file = open(&path, "r", None).unwrap();
    assert_eq!(file.readline(None).unwrap(), b"ab\0cd\n");
    assert_eq!(file.readline(None).unwrap(), b"next\n");
    assert!(file.readline(None).unwrap().is_empty());
    file.close().unwrap();
}

#[test]
fn test_readline_bound_splits_long_line() {
    let (_dir, path) = scratch_path("long.txt");
    write_fixture(&path, b"0123456789\n");

    let mut file = open(&path, "r", None).unwrap();
    assert_eq!(file.readline(Some(4)).unwrap(), b"0123");
    assert_eq!(file.readline(Some(4)).unwrap(), b"4567");
    assert_eq!(file.readline(Some(4)).unwrap(), b"89\n");
    file.close().unwrap();
}

#[test]
fn test_append_mode_keeps_existing_content() {
    let (_dir, path) = scratch_path("append.txt");
    write_fixture(&path, b"first\n");

    let mut file = open(&path, "a", None).unwrap();
    file.write(b"second\n").unwrap();
    file.close().unwrap();

    assert_eq!(read_back(&path), b"first\nsecond\n");
}

#[test]
fn test_fdopen_label_and_descriptor() {
    let (_dir, path) = scratch_path("adopt.txt");
    write_fixture(&path, b"adopted contents");

    let fd = std::fs::File::open(&path).unwrap().into_raw_fd();
    let mut file = fdopen(fd, "r", "<label>", None).unwrap();
    assert_eq!(file.path(), "<label>");
    assert_eq!(file.mode(), "r");
    assert_eq!(file.fd(), fd);
    assert_eq!(file.read(None).unwrap(), b"adopted contents");
    file.close().unwrap();
    assert_eq!(file.fd(), -1);
}

#[test]
fn test_fdopen_pipe_with_line_buffering() {
    let mut fds = [0; 2];
    // SAFETY: `fds` has room for the two descriptors pipe() writes.
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    let [read_fd, write_fd] = fds;

    let mut writer = fdopen(write_fd, "w", "<pipe-w>", Some(1)).unwrap();
    let mut reader = fdopen(read_fd, "r", "<pipe-r>", None).unwrap();

    // Line buffering pushes the line into the pipe without an explicit flush
    writer.write(b"through the pipe\n").unwrap();
    assert_eq!(reader.readline(None).unwrap(), b"through the pipe\n");

    // Pipes cannot be repositioned; the backend error passes through
    let err = reader.seek(SeekFrom::Start(0)).unwrap_err();
    assert_eq!(err.errno(), libc::ESPIPE);

    writer.close().unwrap();
    assert!(reader.read(None).unwrap().is_empty());
    reader.close().unwrap();
}

#[test]
fn test_open_failure_creates_no_handle() {
    let (dir, _path) = scratch_path("unused");
    let missing = dir.path().join("does/not/exist.txt");

    let err = open(&missing, "r", None).unwrap_err();
    assert!(matches!(err, FileError::Backend(_)));
    assert_eq!(err.errno(), libc::ENOENT);
}

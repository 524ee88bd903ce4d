//! Async access to handles through the blocking pool

#![allow(clippy::unwrap_used)]

mod common;

use common::fixtures::{write_fixture, LINES};
use common::{read_back, scratch_path, test_timeout_guard};
use std::time::Duration;
use stdio_file::offload::SharedFile;
use stdio_file::open;

#[compio::test]
async fn test_concurrent_writers_share_one_handle() {
    let _guard = test_timeout_guard(Duration::from_secs(30));
    let (_dir, path) = scratch_path("shared.log");

    let file = SharedFile::open(&path, "w", None).await.unwrap();

    // Spawn 10 tasks, each writing 20 fixed-size records
    let mut handles = Vec::new();
    for task in 0..10u8 {
        let file = file.clone();
        handles.push(compio::runtime::spawn(async move {
            for _ in 0..20 {
                let record = vec![b'a' + task; 8];
                assert_eq!(file.write(record).await.unwrap(), 8);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    file.close().await.unwrap();
    let contents = read_back(&path);
    assert_eq!(contents.len(), 10 * 20 * 8);

    // Records never interleave mid-record
    for record in contents.chunks(8) {
        assert!(record.iter().all(|b| *b == record[0]));
    }
}

#[compio::test]
async fn test_shared_file_from_existing_handle() {
    let _guard = test_timeout_guard(Duration::from_secs(30));
    let (_dir, path) = scratch_path("lines.txt");
    write_fixture(&path, LINES);

    let file = SharedFile::new(open(&path, "r", None).unwrap());
    assert_eq!(file.path(), path.to_string_lossy());
    assert_eq!(file.mode(), "r");
    assert!(file.fd() >= 0);

    assert_eq!(file.readline(None).await.unwrap(), b"alpha\n");
    assert_eq!(file.read(Some(0)).await.unwrap(), b"beta\ngamma");
    assert!(file.read(None).await.unwrap().is_empty());

    file.close().await.unwrap();
    file.close().await.unwrap();
    assert!(file.flush().await.unwrap_err().is_bad_file_descriptor());
}

#[compio::test]
async fn test_invalid_buffering_through_offload() {
    let (_dir, path) = scratch_path("bad.txt");

    let err = SharedFile::open(&path, "w", Some(5)).await.unwrap_err();
    assert_eq!(err.errno(), libc::EINVAL);
    assert_eq!(err.to_string(), "invalid value for \"buffering\": 5");
}

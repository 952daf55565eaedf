#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::os::fd::{FromRawFd, OwnedFd};
use std::thread::JoinHandle;
use tempfile::NamedTempFile;

pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic, non-repeating-looking test content.
pub fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + i / 7) as u8).collect()
}

pub fn fixture_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// A pipe whose write end is fed `bytes` from a background thread and then
/// closed, so the read end sees exactly `bytes` followed by end of input.
pub struct Feed {
    pub read: OwnedFd,
    writer: Option<JoinHandle<()>>,
}

impl Feed {
    pub fn new(bytes: Vec<u8>) -> Self {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let read = unsafe { OwnedFd::from_raw_fd(fds[0]) };
        let write = unsafe { OwnedFd::from_raw_fd(fds[1]) };
        let writer = std::thread::spawn(move || {
            let mut file = File::from(write);
            file.write_all(&bytes).unwrap();
        });
        Self {
            read,
            writer: Some(writer),
        }
    }

    pub fn finish(mut self) {
        if let Some(writer) = self.writer.take() {
            writer.join().unwrap();
        }
    }
}

#![cfg(feature = "std")]
mod common;

use common::{Feed, fixture_file, sample};
use rstest::rstest;
use source_stream::{Errno, Stream};
use std::io::{self, Read, Seek};

#[rstest]
fn read_to_end_through_std() {
    let data = sample(10_000);
    let fixture = fixture_file(&data);
    let mut stream = Stream::open_path(fixture.path()).unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert!(stream.is_eof());
    stream.close().unwrap();
}

#[rstest]
fn std_seek_maps_onto_stream() {
    let data = sample(100);
    let mut stream = Stream::open_memory(&data).unwrap();
    assert_eq!(Seek::seek(&mut stream, io::SeekFrom::End(-10)).unwrap(), 90);
    assert_eq!(stream.stream_position().unwrap(), 90);

    let err = Seek::seek(&mut stream, io::SeekFrom::Start(100)).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(Errno::EFBIG.raw()));

    let mut buf = [0u8; 10];
    Read::read_exact(&mut stream, &mut buf).unwrap();
    assert_eq!(&buf[..], &data[90..]);
}

#[rstest]
fn pipe_from_owned_fd() {
    let data = sample(5000);
    let feed = Feed::new(data.clone());
    let mut stream = Stream::open_pipe_fd(&feed.read).unwrap();
    feed.finish();

    let mut hashed = Vec::new();
    io::copy(&mut stream, &mut hashed).unwrap();
    assert_eq!(hashed, data);
    stream.close().unwrap();
}

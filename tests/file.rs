mod common;

use common::{fixture_file, init_log, sample};
use rstest::rstest;
use source_stream::{Errno, Error, Fill, SeekFrom, Stream, StreamKind};

#[rstest]
fn missing_path_fails_with_enoent() {
    init_log();
    let err = Stream::open_file("target/this_location_is_definitely_non existent:^~")
        .err()
        .unwrap();
    assert!(matches!(err, Error::Open { .. }));
    assert_eq!(err.errno(), Errno::ENOENT);
}

#[rstest]
fn nul_in_path_is_rejected() {
    let err = Stream::open_file("bad\0path").err().unwrap();
    assert_eq!(err.errno(), Errno::EINVAL);
}

#[rstest]
#[case(1)]
#[case(4096)]
#[case(70_000)]
fn reads_whole_fixture(#[case] len: usize) {
    init_log();
    let data = sample(len);
    let fixture = fixture_file(&data);
    let mut stream = Stream::open_file(fixture.path().to_str().unwrap()).unwrap();
    assert_eq!(stream.kind(), StreamKind::File);

    let mut buf = vec![0u8; len];
    assert_eq!(stream.read(&mut buf).unwrap(), Fill::Full(len));
    assert_eq!(buf, data);
    assert!(!stream.is_eof());

    let mut more = [0u8; 1];
    let fill = stream.read(&mut more).unwrap();
    assert_eq!(fill.shortfall(), 1);
    assert!(stream.is_eof());
    assert_eq!(stream.last_error(), None);
    stream.close().unwrap();
}

#[rstest]
fn overlong_read_reports_shortfall() {
    let data = sample(100);
    let fixture = fixture_file(&data);
    let mut stream = Stream::open_file(fixture.path().to_str().unwrap()).unwrap();
    let mut buf = vec![0u8; 101];
    assert_eq!(
        stream.read(&mut buf).unwrap(),
        Fill::Partial {
            filled: 100,
            shortfall: 1
        }
    );
    assert_eq!(&buf[..100], &data[..]);
    assert!(stream.is_eof());
    stream.close().unwrap();
}

#[rstest]
fn path_is_canonical() {
    let fixture = fixture_file(b"x");
    let canonical = std::fs::canonicalize(fixture.path()).unwrap();
    let dir = canonical.parent().unwrap();
    let name = canonical.file_name().unwrap().to_str().unwrap();
    let roundabout = format!("{}/./{}", dir.display(), name);

    let stream = Stream::open_file(&roundabout).unwrap();
    assert_eq!(
        stream.path().unwrap().to_str().unwrap(),
        canonical.to_str().unwrap()
    );
    assert!(stream.as_raw_fd().is_some());
    assert_eq!(stream.len(), None);
    stream.close().unwrap();
}

#[rstest]
fn seek_and_tell_follow_lseek() {
    let data = sample(64);
    let fixture = fixture_file(&data);
    let mut stream = Stream::open_file(fixture.path().to_str().unwrap()).unwrap();

    // a non-zero resulting offset is a success, not an error
    assert_eq!(stream.seek(SeekFrom::Start(10)).unwrap(), 10);
    assert_eq!(stream.tell().unwrap(), 10);
    assert_eq!(stream.seek(SeekFrom::Current(5)).unwrap(), 15);
    assert_eq!(stream.seek(SeekFrom::End(-4)).unwrap(), 60);

    let mut buf = [0u8; 4];
    assert!(stream.read(&mut buf).unwrap().is_full());
    assert_eq!(&buf, &data[60..]);
    assert_eq!(stream.tell().unwrap(), 64);
    assert_eq!(stream.last_error(), None);

    assert_eq!(stream.seek(SeekFrom::Start(0)).unwrap(), 0);
    assert_eq!(stream.tell().unwrap(), 0);
    stream.close().unwrap();
}

#[rstest]
fn failed_seek_is_sticky() {
    let fixture = fixture_file(b"abc");
    let mut stream = Stream::open_file(fixture.path().to_str().unwrap()).unwrap();
    let err = stream.seek(SeekFrom::Current(-10)).unwrap_err();
    assert_eq!(err.errno(), Errno::EINVAL);
    assert_eq!(stream.last_error(), Some(Errno::EINVAL));
    assert_eq!(stream.tell().unwrap(), 0);

    let err = stream.seek(SeekFrom::Start(u64::MAX)).unwrap_err();
    assert_eq!(err.errno(), Errno::EOVERFLOW);

    // later successes leave the recorded error in place
    let mut buf = [0u8; 3];
    assert!(stream.read(&mut buf).unwrap().is_full());
    assert_eq!(stream.last_error(), Some(Errno::EOVERFLOW));
    assert!(!stream.is_eof());
    stream.close().unwrap();
}

#[rstest]
fn reading_a_directory_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = Stream::open_file(dir.path().to_str().unwrap()).unwrap();
    let mut buf = [0u8; 8];
    let err = stream.read(&mut buf).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(stream.last_error(), Some(err.errno()));
    assert!(!stream.is_eof());
    stream.close().unwrap();
}

#[rstest]
fn empty_read_touches_nothing() {
    let fixture = fixture_file(b"");
    let mut stream = Stream::open_file(fixture.path().to_str().unwrap()).unwrap();
    assert_eq!(stream.read(&mut []).unwrap(), Fill::Full(0));
    assert!(!stream.is_eof());
    let mut buf = [0u8; 2];
    assert_eq!(stream.read(&mut buf).unwrap().filled(), 0);
    assert!(stream.is_eof());
    stream.close().unwrap();
}

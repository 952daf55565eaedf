//! `std::io` integration.
//!
//! Lets a [`Stream`] be handed to anything that consumes `Read + Seek`, such
//! as hashers, and adds constructors taking std paths and descriptors.
use crate::{Result, SeekFrom, Stream};
use alloc::ffi::CString;
use std::{
    io,
    os::{
        fd::{AsFd, AsRawFd},
        unix::ffi::OsStrExt,
    },
    path::Path,
};

impl Stream<'static> {
    /// Opens a stream over the file at `path`, accepting any std path.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let name = CString::new(path.as_ref().as_os_str().as_bytes()).map_err(|_| {
            crate::error::open_error(crate::Errno::EINVAL, "path contains a nul byte")
        })?;
        Stream::open_c_file(&name)
    }

    /// Drains a borrowed descriptor, such as `std::io::stdin()` or a child
    /// process's stdout, into a pipe stream.
    pub fn open_pipe_fd(fd: impl AsFd) -> Result<Self> {
        Stream::open_pipe(fd.as_fd().as_raw_fd())
    }
}

impl From<io::SeekFrom> for SeekFrom {
    fn from(pos: io::SeekFrom) -> Self {
        match pos {
            io::SeekFrom::Start(off) => SeekFrom::Start(off),
            io::SeekFrom::Current(off) => SeekFrom::Current(off),
            io::SeekFrom::End(off) => SeekFrom::End(off),
        }
    }
}

impl io::Read for Stream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Stream::read(self, buf)?.filled())
    }
}

impl io::Seek for Stream<'_> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        Ok(Stream::seek(self, pos.into())?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.tell()?)
    }
}

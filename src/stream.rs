use crate::{
    Errno, Result,
    input::{Backend, FileBackend, Fill, Materializer, MemoryBackend, PipeBackend, SeekFrom},
    os::RawFd,
};
use core::ffi::CStr;

/// Which kind of source a [`Stream`] reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    File,
    Memory,
    Pipe,
}

enum Source<'a> {
    File(FileBackend),
    Memory(MemoryBackend<&'a [u8]>),
    Pipe(PipeBackend),
}

/// Runs `$body` with `$backend` bound to whichever backend `$source` holds.
macro_rules! dispatch {
    ($source:expr, $backend:ident => $body:expr) => {
        match $source {
            Source::File($backend) => $body,
            Source::Memory($backend) => $body,
            Source::Pipe($backend) => $body,
        }
    };
}

/// A read-only byte stream over a file, a memory buffer or a pipe.
///
/// Every operation is routed to the backend chosen at construction. End of
/// data and failures are recorded as sticky state: once [`Stream::is_eof`] or
/// [`Stream::last_error`] report something, later calls do not clear it.
/// Running out of data is never an error and an error never implies eof.
///
/// # Examples
/// ```rust
/// use source_stream::{SeekFrom, Stream};
///
/// let mut stream = Stream::open_memory(b"hello world").unwrap();
/// stream.seek(SeekFrom::Start(6)).unwrap();
/// let mut buf = [0u8; 5];
/// assert!(stream.read(&mut buf).unwrap().is_full());
/// assert_eq!(&buf, b"world");
/// assert!(stream.is_eof());
/// stream.close().unwrap();
/// ```
pub struct Stream<'a> {
    source: Source<'a>,
    eof: bool,
    error: Option<Errno>,
}

impl<'a> Stream<'a> {
    fn new(source: Source<'a>) -> Self {
        Self {
            source,
            eof: false,
            error: None,
        }
    }

    /// Opens a stream over the file at `path`.
    ///
    /// The path is canonicalized first; a missing file fails with `ENOENT`
    /// and no stream is created.
    pub fn open_file(path: impl AsRef<str>) -> Result<Stream<'static>> {
        Ok(Stream::new(Source::File(FileBackend::from_path(path)?)))
    }

    /// Opens a stream over the file at the NUL-terminated `path`.
    pub fn open_c_file(path: &CStr) -> Result<Stream<'static>> {
        Ok(Stream::new(Source::File(FileBackend::from_c_path(path)?)))
    }

    /// Opens a stream over `bytes`.
    ///
    /// The buffer is borrowed for the lifetime of the stream and is never
    /// freed by it.
    pub fn open_memory(bytes: &'a [u8]) -> Result<Stream<'a>> {
        Ok(Stream::new(Source::Memory(MemoryBackend::new(bytes))))
    }

    /// Drains `fd` into memory and opens a stream over the result.
    ///
    /// The descriptor is read until end of input but is not closed.
    pub fn open_pipe(fd: RawFd) -> Result<Stream<'static>> {
        Self::open_pipe_with(fd, &Materializer::default())
    }

    /// Like [`Stream::open_pipe`], growing the buffer by the materializer's
    /// block size.
    pub fn open_pipe_with(fd: RawFd, materializer: &Materializer) -> Result<Stream<'static>> {
        Ok(Stream::new(Source::Pipe(materializer.materialize(fd)?)))
    }

    #[inline]
    fn record<T>(&mut self, res: Result<T>) -> Result<T> {
        if let Err(err) = &res {
            self.error = Some(err.errno());
        }
        res
    }

    /// Reads into `buf` from the current position.
    ///
    /// # Returns
    /// * `Ok(Fill::Full(n))` - `buf` was filled completely.
    /// * `Ok(Fill::Partial { filled, shortfall })` - The data ended first; eof
    ///   is now set.
    /// * `Err(error)` - A hard error, also recorded as the sticky error.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<Fill> {
        let res = dispatch!(&mut self.source, backend => {
            let res = backend.read(buf);
            if matches!(res, Ok(Fill::Partial { .. })) || backend.is_exhausted() {
                self.eof = true;
            }
            res
        });
        self.record(res)
    }

    /// Moves the position and returns the new absolute offset.
    ///
    /// A rejected seek leaves the position unchanged and records the error.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let res = dispatch!(&mut self.source, backend => backend.seek(pos));
        self.record(res)
    }

    /// Returns the current absolute offset.
    pub fn tell(&mut self) -> Result<u64> {
        let res = dispatch!(&mut self.source, backend => backend.tell());
        self.record(res)
    }

    /// Closes the stream, releasing the descriptor of a file stream or the
    /// buffer of a pipe stream.
    ///
    /// The stream is consumed even when closing the descriptor fails; the
    /// failure is still returned.
    pub fn close(self) -> Result<()> {
        dispatch!(self.source, backend => backend.close())
    }

    /// Returns `true` once a read has run out of data.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Returns the errno of the most recent failed operation, if any.
    #[inline]
    pub fn last_error(&self) -> Option<Errno> {
        self.error
    }

    pub fn kind(&self) -> StreamKind {
        match self.source {
            Source::File(_) => StreamKind::File,
            Source::Memory(_) => StreamKind::Memory,
            Source::Pipe(_) => StreamKind::Pipe,
        }
    }

    /// The canonical path of a file stream.
    pub fn path(&self) -> Option<&CStr> {
        match &self.source {
            Source::File(file) => Some(file.path()),
            _ => None,
        }
    }

    /// Total length of a memory or pipe stream. File streams report `None`;
    /// their length can change underneath them.
    pub fn len(&self) -> Option<u64> {
        match &self.source {
            Source::File(_) => None,
            Source::Memory(mem) => Some(mem.len() as u64),
            Source::Pipe(pipe) => Some(pipe.len() as u64),
        }
    }

    /// The whole content of a memory or pipe stream, regardless of position.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.source {
            Source::File(_) => None,
            Source::Memory(mem) => Some(mem.as_bytes()),
            Source::Pipe(pipe) => Some(pipe.as_bytes()),
        }
    }

    /// The descriptor of a file stream.
    pub fn as_raw_fd(&self) -> Option<RawFd> {
        match &self.source {
            Source::File(file) => Some(file.as_raw_fd()),
            _ => None,
        }
    }
}

impl core::fmt::Debug for Stream<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stream")
            .field("kind", &self.kind())
            .field("eof", &self.eof)
            .field("error", &self.error)
            .finish()
    }
}

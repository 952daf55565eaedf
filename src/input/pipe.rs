use super::{Backend, Fill, MemoryBackend, SeekFrom};
use crate::{
    Errno, Result,
    error::{alloc_error, io_error},
    os::{self, RawFd},
};
use alloc::vec::Vec;
use delegate::delegate;

/// Growth increment used by [`Materializer::default`].
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Drains a non-seekable descriptor into memory.
///
/// Pipes can be read only once and only forward, so their whole content is
/// copied into an owned buffer that then behaves like any other memory
/// stream. The buffer grows in fixed `block_size` steps.
#[derive(Clone, Copy, Debug)]
pub struct Materializer {
    block_size: usize,
}

impl Default for Materializer {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Materializer {
    /// Creates a materializer with a custom growth increment.
    ///
    /// # Returns
    /// * `Ok(materializer)` - For any non-zero `block_size`.
    /// * `Err(error)` - `EINVAL` when `block_size` is zero.
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(alloc_error(Errno::EINVAL, "block size must be non-zero"));
        }
        Ok(Self { block_size })
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Extends `buf` by one block of zeroes.
    fn grow(&self, buf: &mut Vec<u8>) -> Result<()> {
        let len = buf.len();
        // keep one spare byte of headroom so the size never reaches usize::MAX
        let new_len = len
            .checked_add(self.block_size)
            .filter(|n| n.checked_add(1).is_some())
            .ok_or_else(|| alloc_error(Errno::ENOMEM, "pipe buffer size overflow"))?;
        buf.try_reserve_exact(self.block_size)
            .map_err(|_| alloc_error(Errno::ENOMEM, "pipe buffer allocation failed"))?;
        buf.resize(new_len, 0);
        #[cfg(feature = "log")]
        log::debug!("pipe buffer grown to {} bytes", new_len);
        Ok(())
    }

    /// Reads `fd` until end of input and returns everything it delivered.
    ///
    /// The descriptor is only borrowed: it is neither closed nor rewound.
    /// Interrupted reads are retried; any other error discards the partial
    /// buffer.
    pub fn drain(&self, fd: RawFd) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut pos = 0;
        loop {
            if pos >= buf.len() {
                self.grow(&mut buf)?;
            }
            match os::read(fd, &mut buf[pos..]) {
                Ok(0) => break,
                Ok(cnt) => pos += cnt,
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(io_error(errno, "pipe read failed")),
            }
        }
        buf.truncate(pos);
        #[cfg(feature = "log")]
        log::trace!("drained {} bytes from fd {}", pos, fd);
        Ok(buf)
    }

    /// Drains `fd` into a [`PipeBackend`].
    pub fn materialize(&self, fd: RawFd) -> Result<PipeBackend> {
        Ok(PipeBackend::new(self.drain(fd)?))
    }
}

/// The drained content of a pipe.
///
/// Behaves exactly like a memory backend, except that it owns its buffer and
/// frees it on close.
#[derive(Debug)]
pub struct PipeBackend {
    inner: MemoryBackend<Vec<u8>>,
}

impl PipeBackend {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: MemoryBackend::new(bytes),
        }
    }

    delegate! {
        to self.inner {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn position(&self) -> usize;
            pub fn as_bytes(&self) -> &[u8];
        }
    }
}

impl Backend for PipeBackend {
    delegate! {
        to self.inner {
            fn read(&mut self, buf: &mut [u8]) -> Result<Fill>;
            fn seek(&mut self, pos: SeekFrom) -> Result<u64>;
            fn tell(&mut self) -> Result<u64>;
            fn is_exhausted(&self) -> bool;
        }
    }

    fn close(self) -> Result<()> {
        #[cfg(feature = "log")]
        log::trace!("releasing {} byte pipe buffer", self.inner.len());
        drop(self.inner);
        Ok(())
    }
}

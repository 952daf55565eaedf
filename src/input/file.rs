use super::{Backend, Fill, SeekFrom};
use crate::{
    Errno, Result,
    error::{close_error, io_error, open_error, seek_error},
    os::{self, RawFd, RawFile},
};
use alloc::ffi::CString;
use core::ffi::CStr;

/// A source backed by a file on the filesystem.
///
/// The path is canonicalized before opening and the descriptor is owned by the
/// backend: it is closed by [`Backend::close`], or on drop if the backend is
/// never closed explicitly.
pub struct FileBackend {
    /// Absolute path with symlinks and relative components resolved.
    path: CString,
    inner: RawFile,
}

impl FileBackend {
    /// Opens the file at `path` read-only.
    ///
    /// # Returns
    /// * `Ok(backend)` - The file was resolved and opened.
    /// * `Err(error)` - `Error::Open` carrying the OS errno, e.g. `ENOENT` for
    ///   a missing path or `EINVAL` for a path containing a NUL byte.
    pub fn from_path(path: impl AsRef<str>) -> Result<Self> {
        let name = CString::new(path.as_ref())
            .map_err(|_| open_error(Errno::EINVAL, "path contains a nul byte"))?;
        Self::from_c_path(&name)
    }

    /// Opens the file at the NUL-terminated `path` read-only.
    pub fn from_c_path(path: &CStr) -> Result<Self> {
        let (path, inner) = RawFile::open_canonical(path)?;
        #[cfg(feature = "log")]
        log::trace!("opened {:?} as fd {}", path, inner.as_raw_fd());
        Ok(Self { path, inner })
    }

    /// The canonical path the descriptor was opened from.
    #[inline]
    pub fn path(&self) -> &CStr {
        &self.path
    }

    #[inline]
    pub fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }
}

impl Backend for FileBackend {
    /// Fills `buf` with as many `read(2)` calls as it takes.
    ///
    /// A zero-byte read means the file ended; interrupted reads are retried.
    fn read(&mut self, buf: &mut [u8]) -> Result<Fill> {
        let mut pos = 0;
        while pos < buf.len() {
            match self.inner.read(&mut buf[pos..]) {
                Ok(0) => break,
                Ok(cnt) => pos += cnt,
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(io_error(errno, "read failed")),
            }
        }
        Ok(Fill::new(pos, buf.len()))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(off) => {
                let off = i64::try_from(off)
                    .map_err(|_| seek_error(Errno::EOVERFLOW, "offset too large"))?;
                (off, os::SEEK_SET)
            }
            SeekFrom::Current(off) => (off, os::SEEK_CUR),
            SeekFrom::End(off) => (off, os::SEEK_END),
        };
        self.inner
            .lseek(offset, whence)
            .map_err(|errno| seek_error(errno, "lseek failed"))
    }

    fn tell(&mut self) -> Result<u64> {
        self.inner
            .lseek(0, os::SEEK_CUR)
            .map_err(|errno| seek_error(errno, "lseek failed"))
    }

    fn close(self) -> Result<()> {
        #[cfg(feature = "log")]
        log::trace!("closing {:?}", self.path);
        self.inner
            .close()
            .map_err(|errno| close_error(errno, "close failed"))
    }
}

use super::RawFd;
use crate::{Errno, Result, error::open_error};
use alloc::{borrow::ToOwned, ffi::CString};
use core::{
    ffi::{CStr, c_int, c_void},
    mem::ManuallyDrop,
    ptr,
};
use libc::{O_CLOEXEC, O_RDONLY};

/// An owned, read-only descriptor. Closed on drop unless [`RawFile::close`]
/// already released it.
pub(crate) struct RawFile {
    fd: RawFd,
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "redox"))] {
        use libc::__errno_location as errno_location;
    } else if #[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))] {
        use libc::__errno as errno_location;
    } else {
        use libc::__error as errno_location;
    }
}

#[inline]
fn errno() -> Errno {
    Errno::from_raw(unsafe { *errno_location() })
}

/// Resolves `path` to an absolute path with every symlink and relative
/// component removed.
fn realpath(path: &CStr) -> core::result::Result<CString, Errno> {
    let resolved = unsafe { libc::realpath(path.as_ptr(), ptr::null_mut()) };
    if resolved.is_null() {
        return Err(errno());
    }
    // realpath(3) hands back a malloc'd buffer
    let owned = unsafe { CStr::from_ptr(resolved) }.to_owned();
    unsafe { libc::free(resolved as *mut c_void) };
    Ok(owned)
}

impl RawFile {
    /// Canonicalizes `path` and opens the result read-only.
    ///
    /// Returns the canonical path together with the descriptor.
    pub(crate) fn open_canonical(path: &CStr) -> Result<(CString, Self)> {
        let canonical = realpath(path).map_err(|e| open_error(e, "realpath failed"))?;
        let fd = unsafe { libc::open(canonical.as_ptr(), O_RDONLY | O_CLOEXEC) };
        if fd == -1 {
            return Err(open_error(errno(), "open failed"));
        }
        Ok((canonical, RawFile { fd }))
    }

    #[inline]
    pub(crate) fn as_raw_fd(&self) -> RawFd {
        self.fd
    }

    #[inline]
    pub(crate) fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Errno> {
        read(self.fd, buf)
    }

    #[inline]
    pub(crate) fn lseek(&mut self, offset: i64, whence: c_int) -> core::result::Result<u64, Errno> {
        let off = unsafe { libc::lseek(self.fd, offset as libc::off_t, whence) };
        if off == -1 {
            return Err(errno());
        }
        Ok(off as u64)
    }

    /// Releases the descriptor, reporting the result of `close(2)`.
    pub(crate) fn close(self) -> core::result::Result<(), Errno> {
        let this = ManuallyDrop::new(self);
        if unsafe { libc::close(this.fd) } != 0 {
            return Err(errno());
        }
        Ok(())
    }
}

impl Drop for RawFile {
    fn drop(&mut self) {
        if unsafe { libc::close(self.fd) } != 0 {
            #[cfg(feature = "log")]
            log::warn!("close of fd {} failed: {}", self.fd, errno());
        }
    }
}

/// A single `read(2)` into `buf`. `EINTR` is returned to the caller.
pub(crate) fn read(fd: RawFd, buf: &mut [u8]) -> core::result::Result<usize, Errno> {
    let cnt = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut c_void, buf.len()) };
    if cnt < 0 {
        return Err(errno());
    }
    Ok(cnt as usize)
}

use super::RawFd;
use crate::{Errno, Result, error::open_error};
use alloc::{ffi::CString, format, vec, vec::Vec};
use core::{
    ffi::{CStr, c_int},
    mem::ManuallyDrop,
};
use syscalls::Sysno;

const AT_FDCWD: c_int = -100;
const PATH_MAX: usize = libc::PATH_MAX as usize;

/// An owned, read-only descriptor. Closed on drop unless [`RawFile::close`]
/// already released it.
pub(crate) struct RawFile {
    fd: RawFd,
}

/// Converts a raw syscall return value to a result.
#[inline(always)]
fn from_ret(value: usize) -> core::result::Result<usize, Errno> {
    if value > -4096isize as usize {
        // Truncation of the error value is guaranteed to never occur due to
        // the above check. This is the same check that musl uses:
        // https://git.musl-libc.org/cgit/musl/tree/src/internal/syscall_ret.c?h=v1.1.15
        return Err(Errno::from_raw(-(value as isize) as i32));
    }
    Ok(value)
}

/// Reads the target of the `/proc/self/fd` link of an open descriptor, which
/// is the kernel's canonical path for it.
fn fd_path(fd: RawFd) -> core::result::Result<CString, Errno> {
    let link = format!("/proc/self/fd/{fd}\0");
    let mut buf: Vec<u8> = vec![0; PATH_MAX];
    let len = unsafe {
        from_ret(syscalls::raw_syscall!(
            Sysno::readlinkat,
            AT_FDCWD,
            link.as_ptr(),
            buf.as_mut_ptr(),
            buf.len()
        ))?
    };
    if len >= buf.len() {
        return Err(Errno::ENAMETOOLONG);
    }
    buf.truncate(len);
    CString::new(buf).map_err(|_| Errno::EINVAL)
}

impl RawFile {
    /// Opens `path` read-only and resolves its canonical path.
    ///
    /// The kernel resolves the path during `openat`, so the canonical name is
    /// read back from the descriptor instead of being computed up front.
    /// This needs `/proc` to be mounted: without it the file still opens, but
    /// the call fails with the `readlinkat` errno (usually `ENOENT`) and the
    /// descriptor is closed again.
    pub(crate) fn open_canonical(path: &CStr) -> Result<(CString, Self)> {
        let flags = (libc::O_RDONLY | libc::O_CLOEXEC) as usize;
        let fd = unsafe {
            from_ret(syscalls::raw_syscall!(
                Sysno::openat,
                AT_FDCWD,
                path.as_ptr(),
                flags,
                0
            ))
            .map_err(|e| open_error(e, "openat failed"))?
        };
        let file = RawFile { fd: fd as RawFd };
        // dropping `file` on failure closes the descriptor
        let canonical = fd_path(file.fd).map_err(|e| open_error(e, "readlinkat failed"))?;
        Ok((canonical, file))
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
        let off = unsafe { from_ret(syscalls::raw_syscall!(Sysno::lseek, self.fd, offset, whence))? };
        Ok(off as u64)
    }

    /// Releases the descriptor, reporting the result of `close(2)`.
    pub(crate) fn close(self) -> core::result::Result<(), Errno> {
        let this = ManuallyDrop::new(self);
        unsafe { from_ret(syscalls::raw_syscall!(Sysno::close, this.fd))? };
        Ok(())
    }
}

impl Drop for RawFile {
    fn drop(&mut self) {
        if let Err(_err) = unsafe { from_ret(syscalls::raw_syscall!(Sysno::close, self.fd)) } {
            #[cfg(feature = "log")]
            log::warn!("close of fd {} failed: {}", self.fd, _err);
        }
    }
}

/// A single `read(2)` into `buf`. `EINTR` is returned to the caller.
pub(crate) fn read(fd: RawFd, buf: &mut [u8]) -> core::result::Result<usize, Errno> {
    unsafe {
        from_ret(syscalls::raw_syscall!(
            Sysno::read,
            fd,
            buf.as_mut_ptr(),
            buf.len()
        ))
    }
}

//! Platform layer: raw descriptors and the handful of calls the backends need.
use core::ffi::c_int;

/// A raw file descriptor.
pub type RawFd = c_int;

cfg_if::cfg_if! {
    if #[cfg(feature = "use-syscall")]{
        pub(crate) mod linux_syscall;
        pub(crate) use linux_syscall::*;
    }else if #[cfg(unix)]{
        pub(crate) mod unix;
        pub(crate) use unix::*;
    }
}

/// `lseek` origin for a position relative to the start.
pub(crate) const SEEK_SET: c_int = libc::SEEK_SET;
/// `lseek` origin for a position relative to the current offset.
pub(crate) const SEEK_CUR: c_int = libc::SEEK_CUR;
/// `lseek` origin for a position relative to the end.
pub(crate) const SEEK_END: c_int = libc::SEEK_END;

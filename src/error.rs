use alloc::borrow::Cow;
use core::fmt::{Debug, Display};

/// An OS-style error number.
///
/// The values are the platform's `errno` codes. `Errno::raw` returns the plain
/// integer for callers that speak the C convention, where `0` means success.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(i32);

impl Errno {
    pub const EINTR: Errno = Errno(libc::EINTR);
    pub const ENOENT: Errno = Errno(libc::ENOENT);
    pub const EBADF: Errno = Errno(libc::EBADF);
    pub const EIO: Errno = Errno(libc::EIO);
    pub const ENOMEM: Errno = Errno(libc::ENOMEM);
    pub const EACCES: Errno = Errno(libc::EACCES);
    pub const EINVAL: Errno = Errno(libc::EINVAL);
    pub const EMFILE: Errno = Errno(libc::EMFILE);
    pub const EFBIG: Errno = Errno(libc::EFBIG);
    pub const ESPIPE: Errno = Errno(libc::ESPIPE);
    pub const ENAMETOOLONG: Errno = Errno(libc::ENAMETOOLONG);
    pub const EOVERFLOW: Errno = Errno(libc::EOVERFLOW);

    #[inline]
    pub const fn from_raw(code: i32) -> Self {
        Errno(code)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    fn description(self) -> Option<&'static str> {
        let msg = match self {
            Errno::EINTR => "interrupted system call",
            Errno::ENOENT => "no such file or directory",
            Errno::EBADF => "bad file descriptor",
            Errno::EIO => "input/output error",
            Errno::ENOMEM => "cannot allocate memory",
            Errno::EACCES => "permission denied",
            Errno::EINVAL => "invalid argument",
            Errno::EMFILE => "too many open files",
            Errno::EFBIG => "file too large",
            Errno::ESPIPE => "illegal seek",
            Errno::ENAMETOOLONG => "file name too long",
            Errno::EOVERFLOW => "value too large for defined data type",
            _ => return None,
        };
        Some(msg)
    }
}

impl Debug for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Errno({})", self.0)
    }
}

impl Display for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.description() {
            Some(msg) => write!(f, "{msg} (os error {})", self.0),
            None => write!(f, "os error {}", self.0),
        }
    }
}

/// Error types used throughout the `source_stream` library.
///
/// Every variant carries the [`Errno`] that caused it, which is also the value
/// a [`Stream`](crate::Stream) records as its sticky error.
#[derive(Debug)]
pub enum Error {
    /// The source could not be opened.
    ///
    /// This error typically indicates:
    /// * Path not found or not resolvable
    /// * Permission denied
    /// * Descriptor table exhausted
    Open {
        errno: Errno,
        /// A descriptive message about the open error.
        msg: Cow<'static, str>,
    },

    /// A read from the underlying descriptor failed.
    Io {
        errno: Errno,
        /// A descriptive message about the I/O error.
        msg: Cow<'static, str>,
    },

    /// A seek or tell was rejected, either by the OS or by the bounds of a
    /// memory buffer.
    Seek {
        errno: Errno,
        /// A descriptive message about the rejected position.
        msg: Cow<'static, str>,
    },

    /// The buffer used to materialize a pipe could not grow.
    Alloc {
        errno: Errno,
        /// A descriptive message about the allocation failure.
        msg: Cow<'static, str>,
    },

    /// Releasing the underlying descriptor failed.
    Close {
        errno: Errno,
        /// A descriptive message about the close error.
        msg: Cow<'static, str>,
    },
}

impl Error {
    /// Returns the OS error number behind this error.
    pub fn errno(&self) -> Errno {
        match self {
            Error::Open { errno, .. }
            | Error::Io { errno, .. }
            | Error::Seek { errno, .. }
            | Error::Alloc { errno, .. }
            | Error::Close { errno, .. } => *errno,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Open { errno, msg } => write!(f, "Open error: {msg}: {errno}"),
            Error::Io { errno, msg } => write!(f, "I/O error: {msg}: {errno}"),
            Error::Seek { errno, msg } => write!(f, "Seek error: {msg}: {errno}"),
            Error::Alloc { errno, msg } => write!(f, "Allocation error: {msg}: {errno}"),
            Error::Close { errno, msg } => write!(f, "Close error: {msg}: {errno}"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::from_raw_os_error(err.errno().raw())
    }
}

/// Creates an open error with the specified errno and message.
#[cold]
#[inline(never)]
pub(crate) fn open_error(errno: Errno, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Open {
        errno,
        msg: msg.into(),
    }
}

/// Creates an I/O error with the specified errno and message.
#[cold]
#[inline(never)]
pub(crate) fn io_error(errno: Errno, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Io {
        errno,
        msg: msg.into(),
    }
}

/// Creates a seek error with the specified errno and message.
#[cold]
#[inline(never)]
pub(crate) fn seek_error(errno: Errno, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Seek {
        errno,
        msg: msg.into(),
    }
}

/// Creates an allocation error with the specified errno and message.
#[cold]
#[inline(never)]
pub(crate) fn alloc_error(errno: Errno, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Alloc {
        errno,
        msg: msg.into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn close_error(errno: Errno, msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Close {
        errno,
        msg: msg.into(),
    }
}

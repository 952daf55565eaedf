//! # source_stream
//! A small, read-only byte-stream layer that lets content-processing code treat
//! a file, an in-memory buffer and a pipe the same way.
//! ## Usage
//! Pick a constructor on [`Stream`], then read, seek and tell through the
//! handle. End of data and failures are sticky flags polled with
//! [`Stream::is_eof`] and [`Stream::last_error`]; every failing call also
//! returns its [`Error`].
//!
//! Pipes are drained into memory when opened, so every stream supports random
//! access.
//! ## Example
//! ```rust
//! use source_stream::{Fill, Stream};
//!
//! let mut stream = Stream::open_memory(b"abc").unwrap();
//! let mut buf = [0u8; 4];
//! assert_eq!(
//!     stream.read(&mut buf).unwrap(),
//!     Fill::Partial { filled: 3, shortfall: 1 }
//! );
//! assert!(stream.is_eof());
//! assert_eq!(stream.last_error(), None);
//! ```
#![cfg_attr(not(test), no_std)]
extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

#[cfg(not(unix))]
compile_error!("unsupport os");

#[cfg(all(
    feature = "use-syscall",
    not(all(target_os = "linux", target_pointer_width = "64"))
))]
compile_error!("use-syscall requires 64-bit linux");

mod error;
pub mod input;
#[cfg(feature = "std")]
mod io;
mod os;
mod stream;

pub use error::{Errno, Error};
pub use input::{Fill, Materializer, SeekFrom};
pub use os::RawFd;
pub use stream::{Stream, StreamKind};

pub type Result<T> = core::result::Result<T, Error>;

//! Stream backends and the trait they share
//!
//! This module provides the three concrete sources a [`Stream`](crate::Stream)
//! can sit on: a file opened from a path, a borrowed memory buffer, and a pipe
//! drained into an owned buffer.

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use pipe::{DEFAULT_BLOCK_SIZE, Materializer, PipeBackend};
pub use traits::{Backend, Fill, SeekFrom};

mod file;
mod memory;
mod pipe;
mod traits;

use crate::Result;

/// Where a seek is measured from.
///
/// Mirrors the three conventional `lseek` origins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekFrom {
    /// An absolute offset from the start of the stream.
    Start(u64),
    /// An offset relative to the current position.
    Current(i64),
    /// An offset relative to the end of the stream. Only non-positive values
    /// address bytes inside the stream.
    End(i64),
}

/// The outcome of a read that did not hit a hard error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    /// The whole buffer was filled with this many bytes.
    Full(usize),
    /// The source ran out of data after `filled` bytes; `shortfall` requested
    /// bytes could not be delivered.
    Partial { filled: usize, shortfall: usize },
}

impl Fill {
    #[inline]
    pub(crate) fn new(filled: usize, requested: usize) -> Self {
        debug_assert!(filled <= requested);
        if filled == requested {
            Fill::Full(filled)
        } else {
            Fill::Partial {
                filled,
                shortfall: requested - filled,
            }
        }
    }

    /// Number of bytes written into the caller's buffer.
    #[inline]
    pub fn filled(&self) -> usize {
        match *self {
            Fill::Full(filled) | Fill::Partial { filled, .. } => filled,
        }
    }

    /// Number of requested bytes that could not be delivered.
    #[inline]
    pub fn shortfall(&self) -> usize {
        match *self {
            Fill::Full(_) => 0,
            Fill::Partial { shortfall, .. } => shortfall,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Fill::Full(_))
    }
}

/// A trait for reading bytes from one kind of source.
///
/// `Backend` abstracts the underlying storage (file, memory, pipe), giving the
/// [`Stream`](crate::Stream) handle a single interface to dispatch to.
/// Backends only report results; the sticky eof and error state is kept by
/// the handle.
pub trait Backend {
    /// Reads into `buf` from the current position, advancing it.
    ///
    /// # Returns
    /// * `Ok(Fill::Full(_))` - The buffer was filled completely.
    /// * `Ok(Fill::Partial { .. })` - The source ended first.
    /// * `Err(error)` - A hard I/O error occurred.
    fn read(&mut self, buf: &mut [u8]) -> Result<Fill>;

    /// Moves the position, returning the new absolute offset.
    ///
    /// A rejected seek leaves the position unchanged.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Returns the current absolute offset.
    fn tell(&mut self) -> Result<u64>;

    /// Returns `true` once the position sits at the end of the data.
    ///
    /// Sources that cannot know their length without reading always answer
    /// `false` and report the end through [`Fill::Partial`] instead.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Releases whatever the backend owns.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

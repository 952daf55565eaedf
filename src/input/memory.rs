use super::{Backend, Fill, SeekFrom};
use crate::{Errno, Result, error::seek_error};

/// A cursor over an in-memory byte buffer.
///
/// The storage type decides ownership: `MemoryBackend<&[u8]>` borrows the
/// caller's buffer and never frees it, while `MemoryBackend<Vec<u8>>` owns the
/// bytes and drops them on close. The cursor always satisfies `pos <= len`.
#[derive(Debug)]
pub struct MemoryBackend<B> {
    bytes: B,
    pos: usize,
}

impl<B: AsRef<[u8]>> MemoryBackend<B> {
    /// Creates a backend positioned at the start of `bytes`.
    pub fn new(bytes: B) -> Self {
        Self { bytes, pos: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.as_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The whole buffer, independent of the cursor.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    fn seek_start(&self, off: u64) -> Result<usize> {
        if off >= self.len() as u64 {
            return Err(seek_error(Errno::EFBIG, "offset beyond end of buffer"));
        }
        Ok(off as usize)
    }

    fn seek_current(&self, off: i64) -> Result<usize> {
        let magnitude = off.unsigned_abs();
        if off > 0 {
            // the last byte is the furthest reachable position
            if magnitude >= self.remaining() as u64 {
                return Err(seek_error(Errno::EINVAL, "offset beyond end of buffer"));
            }
            Ok(self.pos + magnitude as usize)
        } else {
            if magnitude > self.pos as u64 {
                return Err(seek_error(Errno::EINVAL, "offset before start of buffer"));
            }
            Ok(self.pos - magnitude as usize)
        }
    }

    fn seek_end(&self, off: i64) -> Result<usize> {
        let magnitude = off.unsigned_abs();
        if off > 0 || magnitude > self.len() as u64 {
            return Err(seek_error(Errno::EINVAL, "offset outside of buffer"));
        }
        Ok(self.len() - magnitude as usize)
    }
}

impl<B: AsRef<[u8]>> Backend for MemoryBackend<B> {
    fn read(&mut self, buf: &mut [u8]) -> Result<Fill> {
        let cnt = buf.len().min(self.remaining());
        let start = self.pos;
        buf[..cnt].copy_from_slice(&self.bytes.as_ref()[start..start + cnt]);
        self.pos += cnt;
        debug_assert!(self.pos <= self.len());
        Ok(Fill::new(cnt, buf.len()))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::Start(off) => self.seek_start(off)?,
            SeekFrom::Current(off) => self.seek_current(off)?,
            SeekFrom::End(off) => self.seek_end(off)?,
        };
        self.pos = target;
        Ok(target as u64)
    }

    fn tell(&mut self) -> Result<u64> {
        match i64::try_from(self.pos) {
            Ok(pos) => Ok(pos as u64),
            Err(_) => Err(seek_error(
                Errno::EOVERFLOW,
                "position not representable as an offset",
            )),
        }
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.pos >= self.len()
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

//! Byte sources for charstring data.

use crate::error::{Error, Result};

/// A seekable source of charstring bytes.
///
/// Charstrings are not length-delimited, so the decoder reads chunks until it
/// reaches a terminating operator. Subroutine calls seek to the subroutine and
/// afterwards back to the byte following the call.
pub trait Source {
    /// Positions the source at an absolute byte offset.
    fn seek(&mut self, offset: u64) -> Option<()>;

    /// Returns the next chunk of data, starting at the current position.
    ///
    /// Returning `None` or an empty chunk signals a read failure.
    fn read(&mut self) -> Option<&[u8]>;
}

/// A source backed by a byte slice.
#[derive(Clone, Debug)]
pub struct MemorySource<'a> {
    data: &'a [u8],
    offset: usize,
    chunk_len: usize,
}

impl<'a> MemorySource<'a> {
    /// Creates a new source that hands out the remaining data in one chunk.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            chunk_len: usize::MAX,
        }
    }

    /// Creates a new source that hands out chunks of at most `chunk_len` bytes.
    pub fn with_chunk_len(data: &'a [u8], chunk_len: usize) -> Self {
        Self {
            data,
            offset: 0,
            chunk_len: chunk_len.max(1),
        }
    }

    /// Returns the current offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Source for MemorySource<'_> {
    fn seek(&mut self, offset: u64) -> Option<()> {
        let offset = usize::try_from(offset).ok()?;

        if offset > self.data.len() {
            return None;
        }

        self.offset = offset;

        Some(())
    }

    fn read(&mut self) -> Option<&[u8]> {
        let tail = self.data.get(self.offset..)?;
        let len = tail.len().min(self.chunk_len);
        self.offset += len;

        Some(&tail[..len])
    }
}

/// The decoder's cursor into a [`Source`].
///
/// Keeps a copy of the current chunk together with the absolute offset of its
/// first byte, so that the current position can be saved and restored across
/// subroutine calls.
pub(crate) struct Input<'a> {
    source: &'a mut dyn Source,
    buf: Vec<u8>,
    next: usize,
    offset: u64,
}

impl<'a> Input<'a> {
    pub(crate) fn new(source: &'a mut dyn Source) -> Self {
        Self {
            source,
            buf: Vec::new(),
            next: 0,
            offset: 0,
        }
    }

    /// Returns the absolute offset of the next unread byte.
    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.offset + self.next as u64
    }

    /// Moves to an absolute offset and loads the first chunk from there.
    pub(crate) fn seek(&mut self, offset: u64) -> Result<()> {
        self.source.seek(offset).ok_or(Error::StreamSeek)?;
        self.offset = offset;
        self.buf.clear();
        self.next = 0;

        self.refill()
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> Result<u8> {
        if self.next == self.buf.len() {
            self.refill()?;
        }

        let b = self.buf[self.next];
        self.next += 1;

        Ok(b)
    }

    fn refill(&mut self) -> Result<()> {
        self.offset += self.buf.len() as u64;
        self.buf.clear();
        self.next = 0;

        match self.source.read() {
            Some(chunk) if !chunk.is_empty() => {
                self.buf.extend_from_slice(chunk);

                Ok(())
            }
            _ => Err(Error::StreamRead),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunked_reads() {
        let data = [1, 2, 3, 4, 5];
        let mut source = MemorySource::with_chunk_len(&data, 2);
        let mut input = Input::new(&mut source);
        input.seek(0).unwrap();

        let mut read = vec![];
        for _ in 0..5 {
            read.push(input.read_byte().unwrap());
        }

        assert_eq!(read, data);
        assert_eq!(input.position(), 5);
        assert_eq!(input.read_byte(), Err(Error::StreamRead));
    }

    #[test]
    fn seek_restores_position() {
        let data = [10, 11, 12, 13, 14, 15];
        let mut source = MemorySource::with_chunk_len(&data, 4);
        let mut input = Input::new(&mut source);
        input.seek(1).unwrap();

        assert_eq!(input.read_byte(), Ok(11));
        assert_eq!(input.read_byte(), Ok(12));
        let saved = input.position();

        input.seek(5).unwrap();
        assert_eq!(input.read_byte(), Ok(15));

        input.seek(saved).unwrap();
        assert_eq!(input.read_byte(), Ok(13));
        assert_eq!(input.read_byte(), Ok(14));
        assert_eq!(input.position(), 5);
    }

    #[test]
    fn seek_out_of_range() {
        let data = [0; 3];
        let mut source = MemorySource::new(&data);
        let mut input = Input::new(&mut source);

        assert_eq!(input.seek(4), Err(Error::StreamSeek));
        // Seeking to the very end succeeds, but there is nothing to read.
        assert_eq!(input.seek(3), Err(Error::StreamRead));
    }
}

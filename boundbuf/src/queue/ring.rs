//! Byte ring used as the storage behind [`RingQueue`](super::RingQueue).
//!
//! The ring has a capacity chosen at runtime and never grows.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{Error, ErrorKind, Result};

/// A fixed-size byte ring for FIFO storage.
///
/// Reads and writes handle wrap-around internally, so callers always see
/// contiguous input and output slices.
#[derive(Debug)]
pub struct RingBuffer {
    /// The underlying storage.
    buffer: Box<[u8]>,

    /// Read position (head).
    head: usize,

    /// Write position (tail).
    tail: usize,

    /// Current number of bytes in buffer.
    len: usize,
}

impl RingBuffer {
    /// Allocates a ring of exactly `capacity` bytes.
    ///
    /// Fails with `InvalidCapacity` for zero and `Allocation` when the
    /// storage cannot be reserved. Nothing is left allocated on failure.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::new(ErrorKind::InvalidCapacity));
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| Error::new(ErrorKind::Allocation))?;
        storage.resize(capacity, 0u8);

        Ok(Self {
            buffer: storage.into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the buffer capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of bytes that can be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.len
    }

    fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Frees the storage. The ring has zero capacity afterwards.
    pub fn release(&mut self) {
        self.buffer = Box::default();
        self.clear();
    }

    /// Writes as much of `data` as fits.
    ///
    /// Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let to_write = core::cmp::min(data.len(), self.remaining());
        if to_write == 0 {
            return 0;
        }

        let cap = self.buffer.len();
        let first_chunk = core::cmp::min(to_write, cap - self.tail);
        self.buffer[self.tail..self.tail + first_chunk].copy_from_slice(&data[..first_chunk]);

        if to_write > first_chunk {
            let second_chunk = to_write - first_chunk;
            self.buffer[..second_chunk].copy_from_slice(&data[first_chunk..to_write]);
        }

        self.tail = (self.tail + to_write) % cap;
        self.len += to_write;

        to_write
    }

    /// Writes all of `data`, or nothing if it does not fit.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.remaining() {
            return Err(Error::new(ErrorKind::QueueFull));
        }

        self.write(data);
        Ok(())
    }

    /// Reads up to `buf.len()` bytes.
    ///
    /// Returns the number of bytes read.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = self.peek(buf);
        self.skip(n)
    }

    /// Copies bytes out without consuming them.
    ///
    /// Returns the number of bytes copied.
    fn peek(&self, buf: &mut [u8]) -> usize {
        let to_read = core::cmp::min(buf.len(), self.len);
        if to_read == 0 {
            return 0;
        }

        let cap = self.buffer.len();
        let first_chunk = core::cmp::min(to_read, cap - self.head);
        buf[..first_chunk].copy_from_slice(&self.buffer[self.head..self.head + first_chunk]);

        if to_read > first_chunk {
            let second_chunk = to_read - first_chunk;
            buf[first_chunk..to_read].copy_from_slice(&self.buffer[..second_chunk]);
        }

        to_read
    }

    /// Consumes bytes without reading them.
    fn skip(&mut self, count: usize) -> usize {
        let to_skip = core::cmp::min(count, self.len);
        if to_skip == 0 {
            return 0;
        }
        self.head = (self.head + to_skip) % self.buffer.len();
        self.len -= to_skip;
        to_skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RingBuffer::with_capacity(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCapacity);
    }

    #[test]
    fn test_basic_write_read() {
        let mut buf = RingBuffer::with_capacity(64).unwrap();

        let written = buf.write(b"Hello");
        assert_eq!(written, 5);
        assert_eq!(buf.len(), 5);

        let mut out = [0u8; 10];
        let read = buf.read(&mut out);
        assert_eq!(read, 5);
        assert_eq!(&out[..5], b"Hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_wrap_around() {
        let mut buf = RingBuffer::with_capacity(8).unwrap();

        buf.write(b"12345");
        let mut out = [0u8; 3];
        buf.read(&mut out);
        assert_eq!(&out, b"123");
        assert_eq!(buf.len(), 2);

        // tail wraps past the end of storage
        buf.write(b"ABCDE");
        assert_eq!(buf.len(), 7);

        let mut out = [0u8; 8];
        let read = buf.read(&mut out);
        assert_eq!(read, 7);
        assert_eq!(&out[..7], b"45ABCDE");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut buf = RingBuffer::with_capacity(32).unwrap();
        buf.write(b"Test data");

        let mut out1 = [0u8; 4];
        let mut out2 = [0u8; 4];
        buf.peek(&mut out1);
        buf.peek(&mut out2);

        assert_eq!(&out1, b"Test");
        assert_eq!(&out2, b"Test");
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn test_write_all_is_all_or_nothing() {
        let mut buf = RingBuffer::with_capacity(8).unwrap();
        buf.write_all(b"123456").unwrap();

        let err = buf.write_all(b"789").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QueueFull);
        assert_eq!(buf.len(), 6);

        buf.write_all(b"78").unwrap();
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.write(b"9"), 0);
    }

    #[test]
    fn test_release() {
        let mut buf = RingBuffer::with_capacity(16).unwrap();
        buf.write(b"abc");
        buf.release();

        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.write(b"x"), 0);
        assert_eq!(buf.read(&mut [0u8; 4]), 0);
    }
}

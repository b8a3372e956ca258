//! Message queue over a byte ring.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use super::{MessageQueue, RingBuffer};
use crate::error::{Error, ErrorKind, Result};

/// A FIFO of variable-sized messages bounded by a byte budget.
///
/// Payload bytes live in a [`RingBuffer`]. Message boundaries are kept
/// as a separate FIFO of lengths, so `used()` is exactly the sum of the
/// queued payload sizes.
#[derive(Debug)]
pub struct RingQueue {
    ring: RingBuffer,
    lengths: VecDeque<usize>,
}

impl RingQueue {
    /// Creates a queue holding at most `capacity` payload bytes.
    pub fn new(capacity: usize) -> Result<Self> {
        let ring = RingBuffer::with_capacity(capacity)?;
        Ok(Self {
            ring,
            lengths: VecDeque::new(),
        })
    }
}

impl MessageQueue for RingQueue {
    fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    fn used(&self) -> usize {
        self.ring.len()
    }

    fn len(&self) -> usize {
        self.lengths.len()
    }

    fn enqueue(&mut self, message: &[u8]) -> Result<()> {
        if message.is_empty() {
            return Err(Error::new(ErrorKind::EmptyMessage));
        }
        if message.len() > self.ring.remaining() {
            return Err(Error::new(ErrorKind::QueueFull));
        }
        self.lengths
            .try_reserve(1)
            .map_err(|_| Error::new(ErrorKind::Allocation))?;

        self.ring.write_all(message)?;
        self.lengths.push_back(message.len());
        Ok(())
    }

    fn dequeue(&mut self) -> Result<Vec<u8>> {
        let len = self
            .lengths
            .pop_front()
            .ok_or_else(|| Error::new(ErrorKind::QueueEmpty))?;

        let mut message = vec![0u8; len];
        let read = self.ring.read(&mut message);
        debug_assert_eq!(read, len);
        Ok(message)
    }

    fn release(&mut self) {
        self.ring.release();
        self.lengths = VecDeque::new();
    }
}

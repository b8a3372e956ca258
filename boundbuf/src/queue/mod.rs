//! Capacity-tracked message storage.
//!
//! This module provides the storage the channel delegates to:
//! - `MessageQueue`: the operations the channel needs from its storage
//! - `RingBuffer`: fixed-size byte ring
//! - `RingQueue`: variable-sized messages stored in a `RingBuffer`
//!
//! None of these types synchronize or block. The channel serializes
//! every call under its own lock.

mod message;
mod ring;

use alloc::vec::Vec;

use crate::error::Result;

pub use message::RingQueue;
pub use ring::RingBuffer;

/// Storage for opaque messages under a byte budget.
///
/// Implement this trait to run a [`Channel`](crate::Channel) over
/// custom storage.
pub trait MessageQueue {
    /// Total byte budget.
    fn capacity(&self) -> usize;

    /// Bytes currently occupied by queued messages.
    fn used(&self) -> usize;

    /// Number of queued messages.
    fn len(&self) -> usize;

    /// Bytes still free.
    fn available(&self) -> usize {
        self.capacity().saturating_sub(self.used())
    }

    /// Returns true if no message is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a copy of `message`. Must not block.
    fn enqueue(&mut self, message: &[u8]) -> Result<()>;

    /// Removes and returns the oldest message. Must not block.
    fn dequeue(&mut self) -> Result<Vec<u8>>;

    /// Frees all contents and storage.
    fn release(&mut self);
}

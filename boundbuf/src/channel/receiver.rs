//! Consumer side of the channel.

use alloc::vec::Vec;

use super::Channel;
use crate::error::{Error, ErrorKind, Result};
use crate::queue::MessageQueue;

/// A message handed out by [`Channel::receive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// An ordinary message.
    Message(Vec<u8>),

    /// The payload matched the channel's special message.
    Special(Vec<u8>),
}

impl Received {
    pub fn is_special(&self) -> bool {
        matches!(self, Received::Special(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Received::Message(bytes) | Received::Special(bytes) => bytes.as_slice(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Received::Message(bytes) | Received::Special(bytes) => bytes,
        }
    }
}

impl<Q: MessageQueue> Channel<Q> {
    /// Receives the oldest message, blocking until one arrives or the
    /// channel closes.
    ///
    /// Messages still queued when the channel closes are not delivered.
    ///
    /// # Errors
    ///
    /// - `Closed`: the channel is closed, or closed while waiting
    /// - `Generic`: the queue failed to produce the message
    pub fn receive(&self) -> Result<Received> {
        let mut shared = self.shared.lock();
        if !shared.is_open() {
            return Err(Error::new(ErrorKind::Closed));
        }

        while shared.queue.used() == 0 {
            log::debug!("Receive waiting for data");
            shared.stats.waits += 1;
            self.data_available.wait(&mut shared);

            if !shared.is_open() {
                return Err(Error::new(ErrorKind::Closed));
            }
        }

        if !shared.is_open() {
            return Err(Error::new(ErrorKind::Closed));
        }

        let message = match shared.queue.dequeue() {
            Ok(message) => message,
            Err(err) => {
                log::warn!("Dequeue failed: error={}", err);
                return Err(Error::generic(err.kind()));
            }
        };

        // Any removal frees space, special message or not.
        self.space_available.notify_one();

        shared.stats.messages_received += 1;
        shared.stats.bytes_received += message.len() as u64;

        log::trace!(
            "Received message: {} bytes, available={}",
            message.len(),
            shared.queue.available()
        );

        if message == self.special_message {
            shared.stats.special_received += 1;
            return Ok(Received::Special(message));
        }

        Ok(Received::Message(message))
    }
}

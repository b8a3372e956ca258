//! Producer side of the channel.

use super::Channel;
use crate::error::{Error, ErrorKind, Result};
use crate::queue::MessageQueue;

impl<Q: MessageQueue> Channel<Q> {
    /// Sends a message, blocking until it is stored or the channel closes.
    ///
    /// A message is stored only once the free space is strictly greater
    /// than its size. A message that would fill the remaining space
    /// exactly keeps the sender waiting. A message of `capacity` bytes or
    /// more therefore waits until the channel closes.
    ///
    /// # Errors
    ///
    /// - `Closed`: the channel is closed, or closed while waiting
    /// - `Generic`: the queue rejected the message (an empty one, for
    ///   example); it is dropped and the channel stays usable
    pub fn send(&self, message: &[u8]) -> Result<()> {
        let mut shared = self.shared.lock();
        if !shared.is_open() {
            return Err(Error::new(ErrorKind::Closed));
        }

        let size = message.len();

        while shared.queue.available() <= size {
            log::debug!(
                "Send waiting for space: size={}, available={}",
                size,
                shared.queue.available()
            );
            shared.stats.waits += 1;
            self.space_available.wait(&mut shared);

            if !shared.is_open() {
                return Err(Error::new(ErrorKind::Closed));
            }
        }

        if !shared.is_open() {
            return Err(Error::new(ErrorKind::Closed));
        }

        if let Err(err) = shared.queue.enqueue(message) {
            log::warn!("Enqueue failed: size={}, error={}", size, err);
            return Err(Error::generic(err.kind()));
        }

        shared.stats.messages_sent += 1;
        shared.stats.bytes_sent += size as u64;

        self.data_available.notify_one();

        log::trace!("Sent message: {} bytes, available={}", size, shared.queue.available());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::channel::fault::FaultyQueue;
    use crate::channel::Received;

    #[test]
    fn test_send_updates_accounting() {
        let channel = Channel::new(10).unwrap();
        channel.send(b"abcd").unwrap();
        assert_eq!(channel.available_bytes(), 6);
        assert_eq!(channel.used_bytes(), 4);
        assert_eq!(channel.len(), 1);

        let stats = channel.stats();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.bytes_sent, 4);
    }

    #[test]
    fn test_empty_message_is_generic() {
        let channel = Channel::new(8).unwrap();
        let err = channel.send(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.cause(), Some(ErrorKind::EmptyMessage));
        assert!(channel.is_empty());

        assert_eq!(channel.send(b"1234567").map_err(|e| e.kind()), Ok(()));
    }

    #[test]
    fn test_capacity_sized_message_waits_until_close() {
        let channel = Arc::new(Channel::new(8).unwrap());

        let producer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.send(b"12345678"))
        };

        // 8 <= 8 even on an empty channel
        thread::sleep(Duration::from_millis(100));
        assert!(!producer.is_finished());
        assert!(channel.is_empty());

        channel.close().unwrap();
        let err = producer.join().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
    }

    #[test]
    fn test_closed_takes_precedence_over_queue_errors() {
        let channel = Channel::new(8).unwrap();
        channel.close().unwrap();
        assert!(channel.send(b"").unwrap_err().is_closed());
        assert!(channel.send(b"123456789").unwrap_err().is_closed());
    }

    #[test]
    fn test_exact_fit_blocks_until_strictly_more_space() {
        let channel = Arc::new(Channel::new(10).unwrap());
        channel.send(b"123456").unwrap();
        assert_eq!(channel.available_bytes(), 4);

        let producer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.send(b"abcd"))
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!producer.is_finished());
        assert_eq!(channel.len(), 1);

        assert_eq!(channel.receive().unwrap(), Received::Message(b"123456".to_vec()));
        producer.join().unwrap().unwrap();
        assert_eq!(channel.receive().unwrap(), Received::Message(b"abcd".to_vec()));
        assert!(channel.stats().waits >= 1);
    }

    #[test]
    fn test_close_wakes_blocked_sender() {
        let channel = Arc::new(Channel::new(4).unwrap());
        channel.send(b"123").unwrap();

        let producer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.send(b"ab"))
        };

        thread::sleep(Duration::from_millis(50));
        channel.close().unwrap();

        let err = producer.join().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
    }

    #[test]
    fn test_enqueue_failure_is_generic_and_recoverable() {
        let channel = Channel::with_queue(FaultyQueue::new(16)).unwrap();
        channel.inject(true, false);

        let err = channel.send(b"lost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.cause(), Some(ErrorKind::Allocation));
        assert_eq!(channel.used_bytes(), 0);
        assert_eq!(channel.stats().messages_sent, 0);

        channel.send(b"kept").unwrap();
        assert_eq!(channel.receive().unwrap().into_bytes(), b"kept");
    }
}

//! Blocking bounded channel.
//!
//! A [`Channel`] couples a [`MessageQueue`] with one lock and two
//! condition variables:
//!
//! - `space_available`: signaled when a message is removed
//! - `data_available`: signaled when a message is added
//!
//! `send` parks on the first, `receive` on the second. `close` wakes every
//! waiter on both so that all of them observe the closed state and return
//! [`ErrorKind::Closed`].
//!
//! # Lifecycle
//!
//! ```text
//! new ──► send / receive (any threads) ──► close ──► join users ──► destroy
//! ```
//!
//! `destroy` takes the channel by value. A channel shared through `Arc`
//! has to be unwrapped first (`Arc::try_unwrap`), which only succeeds once
//! every other handle, and therefore every in-flight `send`/`receive`,
//! is gone.

mod receiver;
mod sender;

use alloc::vec::Vec;
use core::fmt;

use parking_lot::{Condvar, Mutex};

use crate::config::ChannelConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::queue::{MessageQueue, RingQueue};
use crate::SPECIAL_MESSAGE;

pub use receiver::Received;

/// Channel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Channel accepts sends and receives.
    Open,

    /// Channel is closed. This state is final.
    Closed,
}

/// Counters maintained under the channel lock.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Messages accepted by `send`.
    pub messages_sent: u64,

    /// Messages handed out by `receive`, special ones included.
    pub messages_received: u64,

    /// Payload bytes accepted by `send`.
    pub bytes_sent: u64,

    /// Payload bytes handed out by `receive`.
    pub bytes_received: u64,

    /// Special messages handed out by `receive`.
    pub special_received: u64,

    /// Times a sender or receiver parked on a condition.
    pub waits: u64,
}

struct Shared<Q> {
    queue: Q,
    state: ChannelState,
    stats: ChannelStats,
}

impl<Q> Shared<Q> {
    fn is_open(&self) -> bool {
        self.state == ChannelState::Open
    }
}

/// A byte-capacity bounded, blocking MPMC message channel.
///
/// All state lives behind a single mutex. Share the channel between
/// threads with `Arc`.
///
/// # Example
///
/// ```
/// use boundbuf::{Channel, Received};
///
/// let channel = Channel::new(64).unwrap();
/// channel.send(b"hello").unwrap();
/// assert_eq!(channel.receive().unwrap(), Received::Message(b"hello".to_vec()));
///
/// channel.close().unwrap();
/// channel.destroy().unwrap();
/// ```
pub struct Channel<Q = RingQueue> {
    shared: Mutex<Shared<Q>>,
    space_available: Condvar,
    data_available: Condvar,
    capacity: usize,
    special_message: Vec<u8>,
}

impl Channel<RingQueue> {
    /// Creates a channel holding at most `capacity` payload bytes.
    ///
    /// Fails without leaving anything allocated if `capacity` is zero or
    /// the storage cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_queue(RingQueue::new(capacity)?)
    }

    /// Creates a channel from a [`ChannelConfig`].
    pub fn with_config(config: &ChannelConfig) -> Result<Self> {
        let queue = RingQueue::new(config.capacity)?;
        Self::build(queue, config.special_message.clone())
    }
}

impl<Q: MessageQueue> Channel<Q> {
    /// Creates a channel over custom storage.
    pub fn with_queue(queue: Q) -> Result<Self> {
        Self::build(queue, SPECIAL_MESSAGE.to_vec())
    }

    fn build(queue: Q, special_message: Vec<u8>) -> Result<Self> {
        let capacity = queue.capacity();
        if capacity == 0 {
            return Err(Error::new(ErrorKind::InvalidCapacity));
        }

        log::debug!("Channel created: capacity={} bytes", capacity);

        Ok(Self {
            shared: Mutex::new(Shared {
                queue,
                state: ChannelState::Open,
                stats: ChannelStats::default(),
            }),
            space_available: Condvar::new(),
            data_available: Condvar::new(),
            capacity,
            special_message,
        })
    }

    /// Returns the byte budget fixed at creation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the free bytes, sampled under the lock.
    pub fn available_bytes(&self) -> usize {
        self.shared.lock().queue.available()
    }

    /// Returns the occupied bytes, sampled under the lock.
    pub fn used_bytes(&self) -> usize {
        self.shared.lock().queue.used()
    }

    /// Returns the number of queued messages.
    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> ChannelState {
        self.shared.lock().state
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    pub fn stats(&self) -> ChannelStats {
        self.shared.lock().stats
    }

    /// Closes the channel and wakes every blocked sender and receiver.
    ///
    /// Closing twice is an error: the second call returns
    /// [`ErrorKind::Closed`].
    pub fn close(&self) -> Result<()> {
        let mut shared = self.shared.lock();
        if !shared.is_open() {
            return Err(Error::new(ErrorKind::Closed));
        }

        shared.state = ChannelState::Closed;

        // Every waiter must re-check the state, so wake all of them.
        self.space_available.notify_all();
        self.data_available.notify_all();

        log::debug!(
            "Channel closed: {} messages ({} bytes) undelivered",
            shared.queue.len(),
            shared.queue.used()
        );
        Ok(())
    }

    /// Releases the channel's storage.
    ///
    /// The channel must be closed first. On an open channel this returns a
    /// [`DestroyError`] holding the untouched channel, which stays usable.
    pub fn destroy(mut self) -> core::result::Result<(), DestroyError<Q>> {
        // Owning `self` means nobody else holds the lock.
        if self.shared.get_mut().is_open() {
            return Err(DestroyError { channel: self });
        }

        self.shared.get_mut().queue.release();
        log::debug!("Channel destroyed: capacity={} bytes", self.capacity);
        Ok(())
    }
}

impl<Q: MessageQueue> fmt::Debug for Channel<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("Channel")
            .field("capacity", &self.capacity)
            .field("used", &shared.queue.used())
            .field("messages", &shared.queue.len())
            .field("state", &shared.state)
            .finish()
    }
}

/// Returned by [`Channel::destroy`] when the channel is still open.
pub struct DestroyError<Q = RingQueue> {
    channel: Channel<Q>,
}

impl<Q> DestroyError<Q> {
    /// Returns the channel, which was left untouched.
    pub fn into_inner(self) -> Channel<Q> {
        self.channel
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Destroy
    }
}

impl<Q> fmt::Debug for DestroyError<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestroyError")
            .field("capacity", &self.channel.capacity)
            .finish_non_exhaustive()
    }
}

impl<Q> fmt::Display for DestroyError<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ErrorKind::Destroy)
    }
}

impl<Q> std::error::Error for DestroyError<Q> {}

impl<Q> From<DestroyError<Q>> for Error {
    fn from(_: DestroyError<Q>) -> Self {
        Error::new(ErrorKind::Destroy)
    }
}

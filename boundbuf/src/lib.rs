//! # boundbuf - A Bounded Message Channel
//!
//! boundbuf is a blocking multi-producer, multi-consumer message channel
//! whose capacity is measured in payload bytes rather than item count:
//!
//! - **Byte budget**: a send waits until the message fits with room to spare
//! - **Blocking access**: senders wait for space, receivers wait for data
//! - **Explicit shutdown**: `close` wakes every waiter and makes the channel inert
//! - **Special message**: a configurable sentinel payload is reported separately
//! - **Pluggable storage**: any `MessageQueue` can back a channel
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │             Producers  ───────────►  Consumers           │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Channel (std)                         │
//! │  ┌─────────────┐ ┌─────────────────┐ ┌───────────────┐  │
//! │  │    Mutex    │ │ space_available │ │data_available │  │
//! │  └─────────────┘ └─────────────────┘ └───────────────┘  │
//! ├─────────────────────────────────────────────────────────┤
//! │                 Queue (no_std + alloc)                   │
//! │  ┌─────────────────────────┐ ┌───────────────────────┐  │
//! │  │ RingBuffer (byte ring)  │ │ message length FIFO   │  │
//! │  └─────────────────────────┘ └───────────────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use boundbuf::{Channel, Received};
//!
//! let channel = Arc::new(Channel::new(1024).unwrap());
//!
//! let producer = {
//!     let channel = Arc::clone(&channel);
//!     thread::spawn(move || {
//!         channel.send(b"Hello, World!").unwrap();
//!         channel.send(b"splmsg").unwrap();
//!     })
//! };
//!
//! assert_eq!(channel.receive().unwrap(), Received::Message(b"Hello, World!".to_vec()));
//! assert!(channel.receive().unwrap().is_special());
//! producer.join().unwrap();
//!
//! channel.close().unwrap();
//! let channel = Arc::try_unwrap(channel).unwrap();
//! channel.destroy().unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod queue;

#[cfg(feature = "std")]
pub mod channel;

// Re-export commonly used types
#[cfg(feature = "std")]
pub use channel::{Channel, ChannelState, ChannelStats, DestroyError, Received};
pub use config::ChannelConfig;
pub use error::{Error, ErrorKind, Result};
pub use queue::{MessageQueue, RingBuffer, RingQueue};

/// Payload reported as `Received::Special` by default.
pub const SPECIAL_MESSAGE: &[u8] = b"splmsg";

/// Default channel capacity in bytes
pub const DEFAULT_CAPACITY: usize = 4096;

use alloc::vec::Vec;

use crate::{DEFAULT_CAPACITY, SPECIAL_MESSAGE};

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub capacity: usize,
    /// Payload that `receive` reports as `Received::Special`.
    pub special_message: Vec<u8>,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            special_message: SPECIAL_MESSAGE.to_vec(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_special_message(mut self, message: &[u8]) -> Self {
        self.special_message = message.to_vec();
        self
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ChannelConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.special_message, b"splmsg");

        let config = ChannelConfig::new()
            .with_capacity(10)
            .with_special_message(b"stop");
        assert_eq!(config.capacity, 10);
        assert_eq!(config.special_message, b"stop");
    }
}

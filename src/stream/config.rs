//! Prefetching stream configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Default number of vectors a producer may run ahead of its consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Upper bound on the hand-off queue capacity.
pub const MAX_CHANNEL_CAPACITY: usize = 1_000_000;

/// Configuration for background-produced vector streams.
///
/// # Example
///
/// ```ignore
/// let config = StreamConfig::default();
/// assert_eq!(config.channel_capacity, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Maximum number of items queued between producer and consumer.
    pub channel_capacity: usize,

    /// Name given to the producer thread.
    pub thread_name: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            thread_name: "framekit-prefetch".to_string(),
        }
    }
}

impl StreamConfig {
    /// Creates a new stream config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hand-off queue capacity.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Sets the producer thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `channel_capacity` is 0 or greater than 1,000,000.
    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(FrameError::ValidationError(
                "channel_capacity must be at least 1".to_string(),
            ));
        }

        if self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(FrameError::ValidationError(format!(
                "channel_capacity must be at most {MAX_CHANNEL_CAPACITY}"
            )));
        }

        Ok(())
    }
}

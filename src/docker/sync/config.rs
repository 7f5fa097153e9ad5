/**
 * Configuration for the polling engine
 */
use std::time::Duration;

/// Default tick cadence in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Buffer depth of each subscriber's event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Buffer depth of a monitor's shutdown channel
pub const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

/// Knobs for one monitor's polling behavior
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Tick cadence for scheduled refreshes
    pub interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub const fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Validate configuration constants at compile time
const _: () = {
    assert!(DEFAULT_POLL_INTERVAL_MS > 0, "DEFAULT_POLL_INTERVAL_MS must be greater than 0");
    assert!(EVENT_CHANNEL_CAPACITY > 0, "EVENT_CHANNEL_CAPACITY must be greater than 0");
    assert!(SHUTDOWN_CHANNEL_CAPACITY > 0, "SHUTDOWN_CHANNEL_CAPACITY must be greater than 0");
};

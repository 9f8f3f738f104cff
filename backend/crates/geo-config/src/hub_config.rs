use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Broadcast queue capacity constraints
pub const MIN_BROADCAST_CAPACITY: usize = 1;
pub const MAX_BROADCAST_CAPACITY: usize = 100_000;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

// Per-connection delivery deadline constraints (milliseconds)
pub const MIN_DELIVERY_TIMEOUT_MS: u64 = 1;
pub const MAX_DELIVERY_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DELIVERY_TIMEOUT_MS: u64 = 200;

/// Broadcast hub settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Pending broadcasts held before new ones are dropped
    pub broadcast_capacity: usize,
    /// How long the hub waits on a single listener before counting a failed delivery
    pub delivery_timeout_ms: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            delivery_timeout_ms: DEFAULT_DELIVERY_TIMEOUT_MS,
        }
    }
}

impl HubConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_BROADCAST_CAPACITY..=MAX_BROADCAST_CAPACITY).contains(&self.broadcast_capacity) {
            return Err(ConfigError::hub(format!(
                "hub.broadcast_capacity must be {}-{}, got {}",
                MIN_BROADCAST_CAPACITY, MAX_BROADCAST_CAPACITY, self.broadcast_capacity
            )));
        }

        if !(MIN_DELIVERY_TIMEOUT_MS..=MAX_DELIVERY_TIMEOUT_MS).contains(&self.delivery_timeout_ms)
        {
            return Err(ConfigError::hub(format!(
                "hub.delivery_timeout_ms must be {}-{}, got {}",
                MIN_DELIVERY_TIMEOUT_MS, MAX_DELIVERY_TIMEOUT_MS, self.delivery_timeout_ms
            )));
        }

        Ok(())
    }
}

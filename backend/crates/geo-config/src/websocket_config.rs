use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 64;

// Socket write deadline constraints (milliseconds)
pub const MIN_WRITE_TIMEOUT_MS: u64 = 10;
pub const MAX_WRITE_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 1_000;

/// Listener connection settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Outbound frames queued per listener
    pub send_buffer_size: usize,
    /// Deadline for a single frame write to the socket
    pub write_timeout_ms: u64,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::websocket(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.write_timeout_ms < MIN_WRITE_TIMEOUT_MS
            || self.write_timeout_ms > MAX_WRITE_TIMEOUT_MS
        {
            return Err(ConfigError::websocket(format!(
                "websocket.write_timeout_ms must be {}-{}, got {}",
                MIN_WRITE_TIMEOUT_MS, MAX_WRITE_TIMEOUT_MS, self.write_timeout_ms
            )));
        }

        Ok(())
    }
}

use std::time::Duration;

/// Configuration for listener connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Deadline for writing one frame to the socket
    pub write_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 64,
            write_timeout: Duration::from_secs(1),
        }
    }
}

impl From<&geo_config::Config> for ConnectionConfig {
    fn from(config: &geo_config::Config) -> Self {
        Self {
            send_buffer_size: config.websocket.send_buffer_size,
            write_timeout: config.write_timeout(),
        }
    }
}

use std::time::Duration;

/// Configuration for the broadcast hub
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Pending broadcasts held before new submissions are dropped
    pub queue_capacity: usize,
    /// Per-connection deadline for handing a payload to a listener
    pub delivery_timeout: Duration,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            delivery_timeout: Duration::from_millis(200),
        }
    }
}

impl From<&geo_config::Config> for BroadcastConfig {
    fn from(config: &geo_config::Config) -> Self {
        Self {
            queue_capacity: config.hub.broadcast_capacity,
            delivery_timeout: config.delivery_timeout(),
        }
    }
}

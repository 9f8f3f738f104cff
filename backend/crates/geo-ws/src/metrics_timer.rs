use crate::Metrics;

use std::time::Instant;

/// Times one HTTP request against its matched route
pub struct MetricsTimer {
    start: Instant,
    endpoint: String,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics, endpoint: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.into(),
            metrics,
        }
    }

    /// Record elapsed time with the response status
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed();
        self.metrics
            .request_completed(&self.endpoint, status, duration);
    }
}

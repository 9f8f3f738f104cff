use metrics::{counter, gauge, histogram};

/// Metrics collector for the hub, listener connections and HTTP endpoints
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "geo_ws" }
    }

    /// Record listener registered with the hub
    pub fn connection_established(&self) {
        counter!(format!("{}_connections_established_total", self.prefix)).increment(1);
        gauge!(format!("{}_connections_active", self.prefix)).increment(1.0);
    }

    /// Record listener closed
    pub fn connection_closed(&self, reason: &'static str) {
        counter!(format!("{}_connections_closed_total", self.prefix), "reason" => reason)
            .increment(1);
        gauge!(format!("{}_connections_active", self.prefix)).decrement(1.0);
    }

    /// Record a listen request that never reached the registered state
    pub fn upgrade_failed(&self) {
        counter!(format!("{}_upgrades_failed_total", self.prefix)).increment(1);
    }

    /// Record broadcast accepted onto the hub queue
    pub fn broadcast_submitted(&self, message_type: &'static str) {
        counter!(format!("{}_broadcasts_submitted_total", self.prefix), "type" => message_type)
            .increment(1);
    }

    /// Record broadcast dropped before reaching the hub loop
    pub fn broadcast_dropped(&self, reason: &'static str) {
        counter!(format!("{}_broadcasts_dropped_total", self.prefix), "reason" => reason)
            .increment(1);
    }

    /// Record the outcome of one fan-out
    pub fn broadcast_delivered(&self, delivered: usize, failed: usize, duration: std::time::Duration) {
        counter!(format!("{}_deliveries_total", self.prefix)).increment(delivered as u64);
        gauge!(format!("{}_broadcast_recipients", self.prefix)).set((delivered + failed) as f64);
        histogram!(format!("{}_broadcast_duration_seconds", self.prefix))
            .record(duration.as_secs_f64());
    }

    /// Record a failed write to a single listener
    pub fn delivery_failed(&self, reason: &'static str) {
        counter!(format!("{}_delivery_failures_total", self.prefix), "reason" => reason)
            .increment(1);
    }

    /// Record an HTTP request handled by the API router
    pub fn request_completed(&self, endpoint: &str, status: u16, duration: std::time::Duration) {
        let endpoint = endpoint.to_string();
        counter!(
            format!("{}_http_requests_total", self.prefix),
            "endpoint" => endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        histogram!(
            format!("{}_http_request_duration_seconds", self.prefix),
            "endpoint" => endpoint
        )
        .record(duration.as_secs_f64());
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

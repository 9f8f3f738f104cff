use crate::{HubEvent, Result as WsResult};

use axum::extract::ws::Utf8Bytes;

/// A broadcast job: a serialized payload queued for fan-out
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// JSON text frame, ready to send on the wire
    pub payload: Utf8Bytes,
    /// Message type for metrics/logging
    pub message_type: &'static str,
}

impl BroadcastMessage {
    pub fn new(payload: impl Into<Utf8Bytes>, message_type: &'static str) -> Self {
        Self {
            payload: payload.into(),
            message_type,
        }
    }

    /// Serialize a hub event into its wire envelope.
    pub fn from_event(event: &HubEvent) -> WsResult<Self> {
        let json = serde_json::to_string(event)?;
        Ok(Self::new(json, event.event_type()))
    }
}

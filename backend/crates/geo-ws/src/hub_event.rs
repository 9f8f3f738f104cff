use geo_core::Message;

use serde::{Deserialize, Serialize};

/// Envelope pushed to every listener: `{"type": "...", "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HubEvent {
    /// A message was just appended to the store
    NewMessage(Message),
}

impl HubEvent {
    /// Wire discriminator, also used as the metrics/log label
    pub fn event_type(&self) -> &'static str {
        match self {
            HubEvent::NewMessage(_) => "new_message",
        }
    }
}

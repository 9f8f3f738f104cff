use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A location-tagged message. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub lat: f64,
    pub lng: f64,

    // Audit
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: u64, content: String, lat: f64, lng: f64) -> Self {
        Self {
            id,
            content,
            lat,
            lng,
            created_at: Utc::now(),
        }
    }
}

use serde::Deserialize;

/// Body of `POST /messages`
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    /// Opaque message text
    pub content: String,

    pub lat: f64,

    pub lng: f64,
}

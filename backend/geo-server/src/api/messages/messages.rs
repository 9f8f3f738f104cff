//! Message REST API handlers

use crate::{ApiResult, CreateMessageRequest};

use geo_core::Message;
use geo_ws::{AppState, HubEvent};

use axum::{Json, extract::State, http::StatusCode};
use bytes::Bytes;
use log::{debug, error};

// =============================================================================
// Handlers
// =============================================================================

/// POST /messages
///
/// Store a message and push it to every connected listener. The body is
/// decoded as JSON whatever its Content-Type. Broadcasting is best effort:
/// the message is stored and returned even if the hub drops it.
pub async fn create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let request: CreateMessageRequest = serde_json::from_slice(&body)?;

    let message = state
        .store
        .append(request.content, request.lat, request.lng)
        .await?;

    match state.hub.publish(&HubEvent::NewMessage(message.clone())) {
        Ok(true) => debug!("Message {} queued for broadcast", message.id),
        // Drop already logged and counted by the hub
        Ok(false) => {}
        Err(e) => error!("Failed to encode message {} for broadcast: {e}", message.id),
    }

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /messages
///
/// All stored messages in id order
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.store.list().await)
}

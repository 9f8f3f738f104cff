use crate::{CoreError, Message, Result as CoreResult};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;
use tokio::sync::RwLock;

/// Append-only, in-memory log of submitted messages.
///
/// Identifiers start at 1 and increase by one per append. Id assignment and
/// insertion happen under a single write lock, so concurrent appends never
/// share or skip an identifier and readers never observe a half-written
/// entry. Cloning the store shares the same underlying log.
#[derive(Clone, Default)]
pub struct MessageStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    /// Messages in insertion (= identifier) order
    messages: Vec<Message>,
    /// Last identifier handed out, 0 while empty
    last_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new message and return it fully populated.
    pub async fn append(
        &self,
        content: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> CoreResult<Message> {
        let mut inner = self.inner.write().await;

        let last_id = inner.last_id;
        let id = last_id
            .checked_add(1)
            .ok_or_else(|| CoreError::IdentifierExhausted {
                last_id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let message = Message::new(id, content.into(), lat, lng);
        inner.messages.push(message.clone());
        inner.last_id = id;

        debug!(
            "Appended message {id} at ({lat}, {lng}) ({} stored)",
            inner.messages.len()
        );

        Ok(message)
    }

    /// Snapshot of every stored message in insertion order.
    pub async fn list(&self) -> Vec<Message> {
        let inner = self.inner.read().await;
        inner.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.messages.is_empty()
    }
}

#[cfg(test)]
impl MessageStore {
    /// Store whose next append would be assigned `last_id + 1`.
    pub(crate) fn with_last_id(last_id: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                messages: Vec::new(),
                last_id,
            })),
        }
    }
}

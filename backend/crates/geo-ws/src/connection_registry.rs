use crate::ConnectionId;

use std::collections::HashMap;

use axum::extract::ws::Message;
use log::info;
use tokio::sync::mpsc;

/// Live set of registered listener connections.
///
/// Owned by the hub loop; every mutation and every delivery goes through
/// that single task, so no lock is needed here.
#[derive(Default)]
pub struct ConnectionRegistry {
    /// Outbound queue of each live connection, by connection_id
    connections: HashMap<ConnectionId, mpsc::Sender<Message>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound queue.
    pub fn register(&mut self, connection_id: ConnectionId, sender: mpsc::Sender<Message>) {
        self.connections.insert(connection_id, sender);
        info!(
            "Registered connection {connection_id} ({} total)",
            self.connections.len()
        );
    }

    /// Unregister a connection, dropping its outbound queue.
    ///
    /// Dropping the sender ends the connection's writer task, which closes
    /// the socket. Unknown ids are a no-op and return false.
    pub fn unregister(&mut self, connection_id: ConnectionId) -> bool {
        let removed = self.connections.remove(&connection_id).is_some();
        if removed {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                self.connections.len()
            );
        }
        removed
    }

    #[cfg(test)]
    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConnectionId, &mpsc::Sender<Message>)> {
        self.connections.iter()
    }
}

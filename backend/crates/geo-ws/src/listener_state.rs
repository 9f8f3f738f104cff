use crate::{ConnectionId, Result as WsResult, WsError};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

/// Lifecycle of one listener connection.
///
/// `Connecting -> Registered -> Closed`, or `Connecting -> Closed` when the
/// hub could not take the registration. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerState {
    #[default]
    Connecting,
    Registered(ConnectionId),
    Closed,
}

impl ListenerState {
    /// Move to `Registered` once the hub has acknowledged the connection.
    #[track_caller]
    pub fn register(self, connection_id: ConnectionId) -> WsResult<Self> {
        match self {
            ListenerState::Connecting => Ok(ListenerState::Registered(connection_id)),
            from => Err(WsError::InvalidTransition {
                from,
                to: "registered",
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Move to `Closed`. Closing twice is a no-op.
    pub fn close(self) -> Self {
        ListenerState::Closed
    }

    /// Connection id while registered
    pub fn connection_id(&self) -> Option<ConnectionId> {
        match self {
            ListenerState::Registered(connection_id) => Some(*connection_id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ListenerState::Closed)
    }
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerState::Connecting => write!(f, "connecting"),
            ListenerState::Registered(connection_id) => write!(f, "registered({connection_id})"),
            ListenerState::Closed => write!(f, "closed"),
        }
    }
}

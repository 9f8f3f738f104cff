use crate::ListenerState;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Broadcast hub is not running {location}")]
    HubStopped { location: ErrorLocation },

    #[error("Invalid listener transition from {from} to {to} {location}")]
    InvalidTransition {
        from: ListenerState,
        to: &'static str,
        location: ErrorLocation,
    },

    #[error("Event encode failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl WsError {
    #[track_caller]
    pub fn hub_stopped() -> Self {
        Self::HubStopped {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for WsError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;

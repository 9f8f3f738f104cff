//! REST API error types
//!
//! Every error renders as `{"error": {"code", "message"}}` with a matching
//! HTTP status code.

use geo_core::CoreError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "BAD_REQUEST")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Undecodable or malformed request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500); `cause` is logged but never returned
    #[error("Internal error: {message}: {cause} {location}")]
    Internal {
        message: String,
        cause: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client mistakes are routine; only server faults are errors
        match &self {
            ApiError::BadRequest { .. } => log::warn!("{self}"),
            ApiError::Internal { .. } => log::error!("{self}"),
        }

        let (status, body) = match self {
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Request bodies that fail to decode are the client's fault
impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid request body: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        // Don't expose store internals to clients
        ApiError::Internal {
            message: "Failed to store message".to_string(),
            cause: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

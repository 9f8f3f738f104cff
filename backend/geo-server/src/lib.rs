pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics_endpoint;
pub mod request_metrics;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    messages::{
        create_message_request::CreateMessageRequest,
        messages::{create_message, list_messages},
    },
};

pub use crate::routes::build_router;

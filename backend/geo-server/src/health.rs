use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET /health - liveness check, plain `ok`
pub async fn health() -> Response {
    (StatusCode::OK, "ok").into_response()
}

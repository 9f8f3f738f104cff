use crate::{create_message, health, list_messages, metrics_endpoint, request_metrics};

use geo_ws::AppState;

use axum::{
    Router,
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Message ingest and history
        .route("/messages", post(create_message).get(list_messages))
        // WebSocket endpoint
        .route("/listen", get(geo_ws::listen_handler))
        // Operational endpoints
        .route("/health", get(health::health))
        .route("/metrics", get(metrics_endpoint::render_metrics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            request_metrics::track_requests,
        ))
        .with_state(state)
        .layer(cors_layer())
        // Outermost, so it sees the preflight response the CORS layer produced
        .layer(middleware::from_fn(preflight_no_content))
}

/// Any origin; only the methods and headers the API uses
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Preflight requests are answered with `204 No Content`
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

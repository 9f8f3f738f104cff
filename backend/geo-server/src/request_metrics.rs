use geo_ws::{AppState, MetricsTimer};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

/// Route layer recording count and latency per matched route.
///
/// Labels use the route template, never the raw URI, so label cardinality
/// stays bounded.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let timer = MetricsTimer::new(state.metrics.clone(), endpoint);

    let response = next.run(request).await;

    timer.finish(response.status().as_u16());
    response
}

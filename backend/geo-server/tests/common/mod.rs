#![allow(dead_code)]

//! Test infrastructure for geo-server API tests

use geo_core::MessageStore;
use geo_ws::{AppState, BroadcastConfig, ConnectionConfig, Hub, Metrics, ShutdownCoordinator};

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Create AppState for testing
pub fn create_test_app_state() -> AppState {
    let metrics = Metrics::new();

    AppState {
        store: MessageStore::new(),
        hub: Hub::spawn(BroadcastConfig::default(), metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        // Not installed globally; renders whatever this recorder saw
        prometheus: PrometheusBuilder::new().build_recorder().handle(),
    }
}

/// Build a POST /messages request with a raw body
pub fn post_messages(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/messages")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Build a GET request for `uri`
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body and parse it as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Collect a response body as UTF-8 text
pub async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Poll the hub until it reports `expected` connections
pub async fn wait_for_connections(hub: &Hub, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let count = hub.connection_count().await;
        if count == expected {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("expected {expected} connection(s), hub reports {count}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

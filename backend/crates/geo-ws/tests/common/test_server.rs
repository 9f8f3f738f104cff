#![allow(dead_code)]

use geo_core::MessageStore;
use geo_ws::{
    AppState, BroadcastConfig, ConnectionConfig, Hub, Metrics, ShutdownCoordinator,
};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Create a TestServer with default hub and connection settings
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(BroadcastConfig::default(), ConnectionConfig::default())
}

/// Create a TestServer with custom hub and connection settings
pub fn create_test_server_with_config(
    broadcast: BroadcastConfig,
    connection: ConnectionConfig,
) -> TestServerWithState {
    let (app, app_state) = create_app(broadcast, connection);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(broadcast: BroadcastConfig, connection: ConnectionConfig) -> (Router, AppState) {
    let metrics = Metrics::default();

    // Local recorder handle; nothing is installed globally in tests
    let prometheus = PrometheusBuilder::new().build_recorder().handle();

    let app_state = AppState {
        store: MessageStore::new(),
        hub: Hub::spawn(broadcast, metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: connection,
        prometheus,
    };

    let router = Router::new()
        .route("/listen", get(geo_ws::listen_handler))
        .with_state(app_state.clone());

    (router, app_state)
}

/// Poll the hub until it reports `expected` connections.
///
/// Registration happens after the 101 response, so a freshly connected
/// client may not be counted yet.
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

use crate::{ConnectionConfig, Hub, ListenerSession, Metrics, ShutdownCoordinator};

use geo_core::MessageStore;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use log::{debug, error, warn};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared application state for the HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub store: MessageStore,
    pub hub: Hub,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    pub prometheus: PrometheusHandle,
}

/// `GET /listen` upgrade handler
pub async fn listen_handler(
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            warn!("Rejected listen request: {rejection}");
            state.metrics.upgrade_failed();
            return rejection.into_response();
        }
    };

    debug!("Listen upgrade request accepted");

    let metrics = state.metrics.clone();
    ws.on_failed_upgrade(move |e| {
        error!("WebSocket upgrade failed: {e}");
        metrics.upgrade_failed();
    })
    .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();
    let session = ListenerSession::new(state.hub, state.config, state.metrics);

    if let Err(e) = session.run(socket, shutdown_guard).await {
        debug!("Listener session ended with error: {e}");
    }
}

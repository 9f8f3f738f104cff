use geo_server::{build_router, error::ServerError, logger};

use geo_core::MessageStore;
use geo_ws::{AppState, BroadcastConfig, ConnectionConfig, Hub, Metrics, ShutdownCoordinator};

use std::error::Error;

use log::{error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = geo_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = config.log_file_path()?;
    if let Some(parent) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting geo-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Install the global metrics recorder; /metrics renders from this handle
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::MetricsRecorder {
            message: e.to_string(),
        })?;

    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    let hub = Hub::spawn(BroadcastConfig::from(&config), metrics.clone());

    let app_state = AppState {
        store: MessageStore::new(),
        hub,
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig::from(&config),
        prometheus,
    };

    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
        error!("Failed to bind {bind_addr}: {e}");
        e
    })?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}

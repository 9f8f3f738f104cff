pub mod app_state;
pub mod broadcast_config;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_id;
pub mod connection_registry;
pub mod error;
pub mod hub;
pub mod hub_event;
pub mod listener_session;
pub mod listener_state;
pub mod metrics;
pub mod metrics_timer;
pub mod shutdown_coordinator;
pub mod shutdown_guard;

pub use app_state::{AppState, listen_handler};
pub use broadcast_config::BroadcastConfig;
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use hub::Hub;
pub use hub_event::HubEvent;
pub use listener_session::ListenerSession;
pub use listener_state::ListenerState;
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;

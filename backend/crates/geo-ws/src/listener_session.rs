use crate::{
    ConnectionConfig, ConnectionId, Hub, ListenerState, Metrics, Result as WsResult,
    ShutdownGuard, WsError,
};

use std::fmt;
use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{Sink, SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Drives one listener connection from upgrade to close.
///
/// Listeners are receive-only: inbound frames are read so that close frames
/// and socket errors are noticed, then discarded.
pub struct ListenerSession {
    hub: Hub,
    config: ConnectionConfig,
    metrics: Metrics,
    state: ListenerState,
}

impl ListenerSession {
    pub fn new(hub: Hub, config: ConnectionConfig, metrics: Metrics) -> Self {
        Self {
            hub,
            config,
            metrics,
            state: ListenerState::Connecting,
        }
    }

    /// Run the connection lifecycle until the peer goes away or shutdown.
    pub async fn run(
        mut self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsResult<()> {
        let (ws_sender, mut ws_receiver) = socket.split();

        // Bounded outbound queue; the hub holds the only sender
        let (tx, rx) = mpsc::channel::<Message>(self.config.send_buffer_size.max(1));
        let writer = tokio::spawn(write_frames(
            ws_sender,
            rx,
            self.config.write_timeout,
            self.metrics.clone(),
        ));

        let connection_id = match self.hub.register(tx).await {
            Ok(connection_id) => connection_id,
            Err(e) => {
                warn!("Listener could not register with the hub: {e}");
                self.state = self.state.close();
                self.metrics.upgrade_failed();
                let _ = writer.await;
                return Err(e);
            }
        };
        self.state = self.state.register(connection_id)?;
        self.metrics.connection_established();
        info!("Listener connection {connection_id} established");

        let (result, reason) = loop {
            tokio::select! {
                frame = ws_receiver.next() => match frame {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Connection {connection_id} closed by client");
                        break (Ok(()), "client_closed");
                    }
                    Some(Ok(_)) => {
                        // Inbound data is not part of the protocol
                        continue;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket read error on connection {connection_id}: {e}");
                        break (Err(connection_closed(format!("read failed: {e}"))), "error");
                    }
                },

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {connection_id} gracefully");
                    break (Ok(()), "shutdown");
                }
            }
        };

        self.close(connection_id).await;
        // Unregistering dropped the hub's sender, so the writer drains and exits
        match writer.await {
            Ok(summary) if summary.failed > 0 => warn!(
                "Connection {connection_id} lost {} of {} frame(s) on write",
                summary.failed,
                summary.written + summary.failed
            ),
            Ok(_) => {}
            Err(e) => warn!("Writer for connection {connection_id} panicked: {e}"),
        }
        self.metrics.connection_closed(reason);
        info!("Listener connection {connection_id} closed ({reason})");

        result
    }

    async fn close(&mut self, connection_id: ConnectionId) {
        if self.state.is_closed() {
            return;
        }
        if !self.hub.unregister(connection_id).await {
            debug!("Connection {connection_id} was already unregistered");
        }
        self.state = self.state.close();
    }
}

#[track_caller]
fn connection_closed(reason: String) -> WsError {
    WsError::ConnectionClosed {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Frames handed to the socket by one writer task
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WriterSummary {
    pub written: usize,
    pub failed: usize,
}

/// Forward the outbound queue to the socket until the queue closes.
///
/// A timed-out or failed write loses that frame only; the connection stays
/// registered and its read side decides when it ends. After a write error
/// the sink is considered broken and later frames are drained and counted
/// as failed.
pub(crate) async fn write_frames<S>(
    mut sink: S,
    mut rx: mpsc::Receiver<Message>,
    write_timeout: Duration,
    metrics: Metrics,
) -> WriterSummary
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    let mut summary = WriterSummary::default();
    let mut broken = false;

    while let Some(frame) = rx.recv().await {
        if broken {
            summary.failed += 1;
            metrics.delivery_failed("write_error");
            continue;
        }

        match tokio::time::timeout(write_timeout, sink.send(frame)).await {
            Ok(Ok(())) => summary.written += 1,
            Ok(Err(e)) => {
                debug!("Socket write failed: {e}");
                broken = true;
                summary.failed += 1;
                metrics.delivery_failed("write_error");
            }
            Err(_) => {
                warn!("Socket write timed out after {write_timeout:?}");
                summary.failed += 1;
                metrics.delivery_failed("write_timeout");
            }
        }
    }

    if !broken {
        // The peer may already be gone; closing is best effort
        let _ = tokio::time::timeout(write_timeout, sink.close()).await;
    }
    summary
}

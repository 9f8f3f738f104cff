//! Broadcast hub
//!
//! A single coordination task owns the connection registry. Registrations,
//! unregistrations and broadcast jobs all reach it through channels and are
//! processed one at a time:
//!
//! - registry commands travel on an unbounded channel and are never dropped
//! - broadcast jobs travel on a bounded queue; a full queue drops the job
//! - pending registry commands are always applied before the next broadcast
//!   is delivered, so a registration or unregistration submitted before a
//!   broadcast is visible to that broadcast
//!
//! The two channels are not ordered against each other. A broadcast reaches
//! whoever is registered when the loop delivers it, so a command submitted
//! after a broadcast was queued, but before it was delivered, is also
//! applied first.

use crate::{
    BroadcastConfig, BroadcastMessage, ConnectionId, ConnectionRegistry, HubEvent, Metrics,
    Result as WsResult, WsError,
};

use std::time::{Duration, Instant};

use axum::extract::ws::Message;
use log::{debug, error, info, warn};
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};
use tokio::sync::{mpsc, oneshot};

enum HubCommand {
    Register {
        sender: mpsc::Sender<Message>,
        reply: oneshot::Sender<ConnectionId>,
    },
    Unregister {
        connection_id: ConnectionId,
        reply: oneshot::Sender<bool>,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
}

/// Cloneable handle to the hub loop.
///
/// The loop stops once every handle has been dropped; connections still
/// registered at that point are closed.
#[derive(Clone)]
pub struct Hub {
    commands: mpsc::UnboundedSender<HubCommand>,
    broadcasts: mpsc::Sender<BroadcastMessage>,
    metrics: Metrics,
}

impl Hub {
    /// Spawn the hub loop on the current tokio runtime.
    pub fn spawn(config: BroadcastConfig, metrics: Metrics) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (broadcasts_tx, broadcasts_rx) = mpsc::channel(config.queue_capacity.max(1));

        info!(
            "Starting broadcast hub (queue capacity {}, delivery timeout {:?})",
            config.queue_capacity, config.delivery_timeout
        );

        let hub_loop = HubLoop {
            registry: ConnectionRegistry::new(),
            commands: commands_rx,
            broadcasts: broadcasts_rx,
            delivery_timeout: config.delivery_timeout,
            metrics: metrics.clone(),
        };
        tokio::spawn(hub_loop.run());

        Self {
            commands: commands_tx,
            broadcasts: broadcasts_tx,
            metrics,
        }
    }

    /// Register a listener's outbound queue.
    ///
    /// Resolves once the hub has applied the registration; every broadcast
    /// submitted afterwards is delivered to this connection.
    pub async fn register(&self, sender: mpsc::Sender<Message>) -> WsResult<ConnectionId> {
        let (reply, ack) = oneshot::channel();
        self.commands
            .send(HubCommand::Register { sender, reply })
            .map_err(|_| WsError::hub_stopped())?;
        ack.await.map_err(|_| WsError::hub_stopped())
    }

    /// Unregister a listener and close its outbound queue.
    ///
    /// Returns whether the connection was registered. Unknown or already
    /// removed ids, and a stopped hub, are a no-op.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let (reply, ack) = oneshot::channel();
        if self
            .commands
            .send(HubCommand::Unregister {
                connection_id,
                reply,
            })
            .is_err()
        {
            debug!("Hub stopped, nothing to unregister for {connection_id}");
            return false;
        }
        ack.await.unwrap_or(false)
    }

    /// Queue a broadcast without waiting.
    ///
    /// Returns false when the job was dropped because the queue is full or
    /// the hub has stopped. Never blocks the caller.
    pub fn broadcast(&self, message: BroadcastMessage) -> bool {
        match self.broadcasts.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                warn!(
                    "Broadcast queue full, dropping {} broadcast",
                    dropped.message_type
                );
                self.metrics.broadcast_dropped("queue_full");
                false
            }
            Err(TrySendError::Closed(dropped)) => {
                error!(
                    "Broadcast hub stopped, dropping {} broadcast",
                    dropped.message_type
                );
                self.metrics.broadcast_dropped("hub_stopped");
                false
            }
        }
    }

    /// Encode an event and queue it for broadcast.
    pub fn publish(&self, event: &HubEvent) -> WsResult<bool> {
        let message = BroadcastMessage::from_event(event)?;
        let message_type = message.message_type;
        let queued = self.broadcast(message);
        if queued {
            self.metrics.broadcast_submitted(message_type);
        }
        Ok(queued)
    }

    /// Number of currently registered connections.
    pub async fn connection_count(&self) -> usize {
        let (reply, ack) = oneshot::channel();
        if self.commands.send(HubCommand::Count { reply }).is_err() {
            return 0;
        }
        ack.await.unwrap_or(0)
    }
}

struct HubLoop {
    registry: ConnectionRegistry,
    commands: mpsc::UnboundedReceiver<HubCommand>,
    broadcasts: mpsc::Receiver<BroadcastMessage>,
    delivery_timeout: Duration,
    metrics: Metrics,
}

impl HubLoop {
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                Some(command) = self.commands.recv() => self.handle_command(command),

                Some(message) = self.broadcasts.recv() => {
                    // A command may have been queued between the two polls above
                    while let Ok(command) = self.commands.try_recv() {
                        self.handle_command(command);
                    }
                    self.deliver(message).await;
                }

                else => break,
            }
        }

        info!(
            "Broadcast hub stopped, closing {} connection(s)",
            self.registry.len()
        );
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register { sender, reply } => {
                let connection_id = ConnectionId::new();
                self.registry.register(connection_id, sender);
                if reply.send(connection_id).is_err() {
                    // Caller went away before the ack; don't keep an orphan
                    self.registry.unregister(connection_id);
                }
            }
            HubCommand::Unregister {
                connection_id,
                reply,
            } => {
                let removed = self.registry.unregister(connection_id);
                let _ = reply.send(removed);
            }
            HubCommand::Count { reply } => {
                let _ = reply.send(self.registry.len());
            }
        }
    }

    /// Best-effort fan-out to every registered connection.
    async fn deliver(&self, message: BroadcastMessage) {
        let started = Instant::now();
        if self.registry.is_empty() {
            debug!("No listeners for {} broadcast", message.message_type);
            self.metrics.broadcast_delivered(0, 0, started.elapsed());
            return;
        }

        let frame = Message::Text(message.payload);
        let mut delivered = 0;
        let mut failed = 0;

        for (connection_id, sender) in self.registry.iter() {
            match sender
                .send_timeout(frame.clone(), self.delivery_timeout)
                .await
            {
                Ok(()) => delivered += 1,
                Err(SendTimeoutError::Timeout(_)) => {
                    failed += 1;
                    warn!(
                        "Delivery to connection {connection_id} timed out after {:?}",
                        self.delivery_timeout
                    );
                    self.metrics.delivery_failed("timeout");
                }
                Err(SendTimeoutError::Closed(_)) => {
                    failed += 1;
                    debug!("Delivery to connection {connection_id} failed: connection closed");
                    self.metrics.delivery_failed("closed");
                }
            }
        }

        debug!(
            "Delivered {} broadcast to {delivered} connection(s), {failed} failed",
            message.message_type
        );
        self.metrics
            .broadcast_delivered(delivered, failed, started.elapsed());
    }
}

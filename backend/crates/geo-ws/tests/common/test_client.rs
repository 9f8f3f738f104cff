#![allow(dead_code)]

use axum_test::{TestServer, TestWebSocket};

/// Listener test client wrapper
pub struct ListenerClient {
    ws: TestWebSocket,
}

impl ListenerClient {
    /// Open a listener connection on `/listen`
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/listen").await.into_websocket().await;
        Self { ws }
    }

    /// Receive the next pushed frame parsed as JSON
    pub async fn receive_json(&mut self) -> serde_json::Value {
        let text = self.ws.receive_text().await;
        serde_json::from_str(&text).expect("pushed frame is not JSON")
    }

    /// Send text the server is expected to ignore
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Open `count` listener connections
pub async fn connect_listeners(server: &TestServer, count: usize) -> Vec<ListenerClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(ListenerClient::connect(server).await);
    }
    clients
}

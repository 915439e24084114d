//! Test fixtures: an in-process relay server and WebSocket test clients.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use sofa_server::{
    domain::{RoomId, RoomRepository},
    infrastructure::repository::InMemoryRoomRepository,
    ui::{serve, state::AppState},
};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Relay server bound to an ephemeral port for the duration of a test
pub struct TestServer {
    addr: SocketAddr,
    pub repository: Arc<InMemoryRoomRepository>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = Arc::new(AppState::new(repository.clone()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            serve(listener, state, async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("Test server failed");
        });

        Self {
            addr,
            repository,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn ws_url(&self, room: Option<&str>) -> String {
        match room {
            Some(room) => format!("ws://{}/ws?room={}", self.addr, room),
            None => format!("ws://{}/ws", self.addr),
        }
    }

    pub async fn connect(&self, room: Option<&str>) -> TestClient {
        TestClient::connect(&self.ws_url(room)).await
    }

    /// Occupancy of a room, or None if the room does not exist
    pub async fn occupancy(&self, room: &str) -> Option<usize> {
        let room_id = RoomId::new(room.to_string()).expect("Invalid room id");
        self.repository
            .get_room(&room_id)
            .await
            .map(|room| room.occupancy())
    }

    pub async fn room_count(&self) -> usize {
        self.repository.count_rooms().await
    }

    /// Poll until the room reaches the expected occupancy (None = deleted)
    pub async fn wait_for_occupancy(&self, room: &str, expected: Option<usize>) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let actual = self.occupancy(room).await;
            if actual == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Room '{room}' occupancy is {actual:?}, expected {expected:?}"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// WebSocket client used by the tests
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url)
            .await
            .expect("Failed to connect to test server");
        Self { stream }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send text");
    }

    pub async fn send_json(&mut self, value: &serde_json::Value) {
        self.send_text(&value.to_string()).await;
    }

    /// Next text frame, skipping control frames
    pub async fn recv_text(&mut self) -> String {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a message")
                .expect("Stream ended")
                .expect("WebSocket error");
            match msg {
                Message::Text(text) => return text.as_str().to_string(),
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("Unexpected message: {other:?}"),
            }
        }
    }

    pub async fn recv_json(&mut self) -> serde_json::Value {
        let text = self.recv_text().await;
        serde_json::from_str(&text).expect("Received invalid JSON")
    }

    /// Assert that no text frame arrives within a short window
    pub async fn expect_silence(&mut self) {
        match tokio::time::timeout(SILENCE_WINDOW, self.stream.next()).await {
            Err(_) => {}
            Ok(Some(Ok(Message::Text(text)))) => panic!("Unexpected message: {}", text.as_str()),
            Ok(other) => panic!("Unexpected stream event: {other:?}"),
        }
    }

    /// Assert that the server closes the connection
    pub async fn expect_closed(&mut self) {
        loop {
            match tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for close")
            {
                None | Some(Ok(Message::Close(_))) | Some(Err(_)) => return,
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Ok(other)) => panic!("Unexpected message before close: {other:?}"),
            }
        }
    }

    /// Drop the TCP connection without a closing handshake
    pub fn abort(self) {
        drop(self.stream);
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

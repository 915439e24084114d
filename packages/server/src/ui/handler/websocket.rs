//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, RoomId},
    infrastructure::dto::Envelope,
    ui::state::{AppState, ConnectQuery},
    usecase::{
        ConnectError, ConnectParticipantUseCase, DisconnectParticipantUseCase, RelayError,
        RelayMessageUseCase,
    },
};

use super::connection::ConnectionState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let room_id = match RoomId::from_query(query.room) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid room parameter: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let connection_id = ConnectionIdFactory::generate();
    let mut connection = ConnectionState::Connecting;
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive relayed messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connect_usecase = ConnectParticipantUseCase::new(state.repository.clone());
    let admission = match connect_usecase
        .execute(room_id.clone(), connection_id.clone(), tx)
        .await
    {
        Ok(admission) => admission,
        Err(ConnectError::RoomFull(_)) => {
            tracing::warn!(
                "Room '{}' is full. Rejecting connection '{}'",
                room_id,
                connection_id
            );
            connection.reject();
            send_envelope(&mut sender, &connection_id, &Envelope::room_full()).await;
            send_close(&mut sender, &connection_id).await;
            return;
        }
        Err(e) => {
            tracing::error!("Failed to admit connection '{}': {}", connection_id, e);
            connection.reject();
            send_close(&mut sender, &connection_id).await;
            return;
        }
    };
    connection.admit(admission.room_id.clone());

    // roomInfo is written before the send task starts draining relayed messages
    let room_info = Envelope::room_info(admission.users_in_room);
    if send_envelope(&mut sender, &connection_id, &room_info).await {
        let relay_usecase = RelayMessageUseCase::new(state.repository.clone());
        let recv_connection_id = connection_id.clone();

        // Spawn a task to relay messages from this connection to the rest of the room
        let mut recv_task = tokio::spawn(async move {
            while let Some(msg) = receiver.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::error!(
                            "WebSocket error on connection '{}': {}",
                            recv_connection_id,
                            e
                        );
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        match relay_usecase.execute(&recv_connection_id, text.as_str()).await {
                            Ok(report) => {
                                tracing::debug!(
                                    "Relayed message from '{}' to {} of {} recipient(s)",
                                    recv_connection_id,
                                    report.delivered(),
                                    report.deliveries.len()
                                );
                            }
                            Err(e @ (RelayError::Malformed(_) | RelayError::NotRelayable(_))) => {
                                tracing::warn!(
                                    "Dropped message from '{}': {}",
                                    recv_connection_id,
                                    e
                                );
                            }
                            Err(e) => {
                                tracing::error!("Failed to relay message: {}", e);
                            }
                        }
                    }
                    Message::Binary(_) => {
                        tracing::warn!(
                            "Dropped binary message from '{}'",
                            recv_connection_id
                        );
                    }
                    Message::Ping(_) | Message::Pong(_) => {
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                    Message::Close(_) => {
                        tracing::info!("Connection '{}' requested close", recv_connection_id);
                        break;
                    }
                }
            }
        });

        // Spawn a task to forward queued messages to this connection
        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if sender.send(Message::Text(msg.into())).await.is_err() {
                    break;
                }
            }
        });

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };
    }

    let Some(room_id) = connection.close() else {
        return;
    };

    let disconnect_usecase = DisconnectParticipantUseCase::new(state.repository.clone());
    match disconnect_usecase.execute(&connection_id).await {
        Ok(leave) => {
            tracing::debug!(
                "Notified {} remaining member(s) of room '{}'",
                leave.notified.delivered(),
                room_id
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect connection '{}': {}", connection_id, e);
        }
    }
}

/// Write a server-synthesized envelope straight to the socket
async fn send_envelope(
    sender: &mut SplitSink<WebSocket, Message>,
    connection_id: &ConnectionId,
    envelope: &Envelope,
) -> bool {
    let json = match envelope.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize '{}' envelope: {}", envelope.kind(), e);
            return false;
        }
    };

    match sender.send(Message::Text(json.into())).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                "Failed to send '{}' to '{}': {}",
                envelope.kind(),
                connection_id,
                e
            );
            false
        }
    }
}

/// Send a Close frame to a rejected connection
async fn send_close(sender: &mut SplitSink<WebSocket, Message>, connection_id: &ConnectionId) {
    if let Err(e) = sender.send(Message::Close(None)).await {
        tracing::debug!("Failed to send close to '{}': {}", connection_id, e);
    }
}

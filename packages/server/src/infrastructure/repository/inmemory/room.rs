//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! ルーム表と接続表を 1 つの Mutex で保護し、すべての操作を同じ排他領域で行います。
//! 再起動をまたいだ永続化は行いません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Admitted, ClientSender, ConnectionId, Departure, Member, Recipient, RepositoryError, Room, RoomId,
    RoomRepository, Timestamp,
};

/// Registered connection
struct ClientInfo {
    room_id: RoomId,
    sender: ClientSender,
}

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<RoomId, Room>,
    connections: HashMap<ConnectionId, ClientInfo>,
}

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    state: Mutex<RegistryState>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Other members of `room` with their outbound channels
fn recipients(
    room: &Room,
    connections: &HashMap<ConnectionId, ClientInfo>,
    exclude: &ConnectionId,
) -> Vec<Recipient> {
    room.members
        .iter()
        .filter(|m| &m.id != exclude)
        .filter_map(|m| {
            connections.get(&m.id).map(|info| Recipient {
                connection_id: m.id.clone(),
                sender: info.sender.clone(),
            })
        })
        .collect()
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        sender: ClientSender,
        joined_at: Timestamp,
    ) -> Result<Admitted, RepositoryError> {
        let mut state = self.state.lock().await;
        let RegistryState { rooms, connections } = &mut *state;

        if connections.contains_key(&connection_id) {
            return Err(RepositoryError::AlreadyRegistered(connection_id));
        }

        // A full room is never created here, so a rejected attempt leaves nothing behind
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), joined_at));

        room.admit(Member::new(connection_id.clone(), joined_at))
            .map_err(|_| RepositoryError::RoomFull(room_id.clone()))?;

        if room.occupancy() == 1 {
            tracing::info!("Room '{}' created", room_id);
        }

        let others = recipients(room, connections, &connection_id);
        let room = room.clone();
        connections.insert(connection_id, ClientInfo { room_id, sender });

        Ok(Admitted { room, others })
    }

    async fn unregister(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError> {
        let mut state = self.state.lock().await;
        let RegistryState { rooms, connections } = &mut *state;

        let info = connections
            .remove(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.clone()))?;

        let (remaining, survivors) = match rooms.get_mut(&info.room_id) {
            Some(room) => {
                room.remove_member(connection_id);
                (room.occupancy(), recipients(room, connections, connection_id))
            }
            None => (0, Vec::new()),
        };

        // An empty room must not outlive its last member
        if remaining == 0
            && let Some(room) = rooms.remove(&info.room_id)
        {
            tracing::info!(
                "Room '{}' is empty and has been removed (created at {})",
                room.id,
                sofa_shared::time::timestamp_to_jst_rfc3339(room.created_at.value())
            );
        }

        Ok(Departure {
            room_id: info.room_id,
            remaining,
            survivors,
        })
    }

    async fn members_of(&self, room_id: &RoomId, exclude: &ConnectionId) -> Vec<Recipient> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(|room| recipients(room, &state.connections, exclude))
            .unwrap_or_default()
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state
            .connections
            .get(connection_id)
            .map(|info| info.room_id.clone())
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let state = self.state.lock().await;
        state.rooms.get(room_id).cloned()
    }

    async fn count_rooms(&self) -> usize {
        let state = self.state.lock().await;
        state.rooms.len()
    }
}

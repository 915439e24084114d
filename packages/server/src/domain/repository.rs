//! Repository trait (Connection Registry contract)
//!
//! ドメイン層が定義するデータアクセスの抽象。
//! UseCase 層はこの trait に依存し、具体的な実装（InMemory など）には依存しません。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{ConnectionId, RepositoryError, Room, RoomId, Timestamp};

/// Outbound channel of one connection; the handler's send task drains it to the socket
pub type ClientSender = UnboundedSender<String>;

/// A fan-out target: one other member of a room and its outbound channel
#[derive(Debug, Clone)]
pub struct Recipient {
    pub connection_id: ConnectionId,
    pub sender: ClientSender,
}

/// Result of admitting a connection to a room
#[derive(Debug, Clone)]
pub struct Admitted {
    /// Snapshot of the room after admission
    pub room: Room,
    /// Members that were already in the room, snapshotted with the admission
    pub others: Vec<Recipient>,
}

/// Result of removing a connection from the registry
#[derive(Debug, Clone)]
pub struct Departure {
    pub room_id: RoomId,
    /// Members left in the room; zero means the room was deleted
    pub remaining: usize,
    /// Members left in the room, snapshotted with the removal
    pub survivors: Vec<Recipient>,
}

/// Connection Registry
///
/// Every operation runs inside a single mutual-exclusion domain, so admission
/// checks and membership snapshots never observe a half-applied change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Admit a connection to a room, creating the room if absent
    ///
    /// Returns the room after admission and the members that were already there.
    ///
    /// # Errors
    ///
    /// `RepositoryError::RoomFull` when the room is at capacity (registry unchanged),
    /// `RepositoryError::AlreadyRegistered` when the connection is already a member somewhere.
    async fn register(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        sender: ClientSender,
        joined_at: Timestamp,
    ) -> Result<Admitted, RepositoryError>;

    /// Remove a connection; deletes its room when it was the last member
    ///
    /// The returned survivors are the audience for the leave notification.
    async fn unregister(&self, connection_id: &ConnectionId)
    -> Result<Departure, RepositoryError>;

    /// Members of a room other than `exclude`, snapshotted under the lock
    async fn members_of(&self, room_id: &RoomId, exclude: &ConnectionId) -> Vec<Recipient>;

    /// Room the connection is registered in
    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// Snapshot of a room, if it exists
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Number of live rooms
    async fn count_rooms(&self) -> usize;
}

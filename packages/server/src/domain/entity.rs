//! Core domain models for the relay.

use serde::{Deserialize, Serialize};

use super::{
    error::RoomError,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// Maximum number of members in a room
pub const ROOM_CAPACITY: usize = 2;

/// Represents a room and the connections currently admitted to it
///
/// A room only exists while it has at least one member. The registry creates it
/// on the first admission and deletes it when the last member leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Members currently in the room (unordered)
    pub members: Vec<Member>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
    /// Maximum number of members allowed
    pub capacity: usize,
}

impl Room {
    /// Create a new empty room with the fixed capacity
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self::with_capacity(id, created_at, ROOM_CAPACITY)
    }

    /// Create a new empty room with a custom capacity
    pub fn with_capacity(id: RoomId, created_at: Timestamp, capacity: usize) -> Self {
        Self {
            id,
            members: Vec::with_capacity(capacity),
            created_at,
            capacity,
        }
    }

    /// Admit a member to the room
    ///
    /// # Errors
    ///
    /// Returns `RoomError::Full` if the room is at capacity. The room is left unchanged.
    pub fn admit(&mut self, member: Member) -> Result<(), RoomError> {
        if self.is_full() {
            return Err(RoomError::Full {
                capacity: self.capacity,
            });
        }
        self.members.push(member);
        Ok(())
    }

    /// Remove a member by connection ID. Returns whether the member was present.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != connection_id);
        self.members.len() != before
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.id == connection_id)
    }

    pub fn occupancy(&self) -> usize {
        self.members.len()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A connection admitted to a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ConnectionId,
    /// Timestamp when the connection was admitted
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(id: ConnectionId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

//! Per-connection lifecycle state.

use crate::domain::RoomId;

/// Lifecycle of one WebSocket connection
///
/// `Connecting` starts once the socket is accepted and the room is resolved.
/// `Closed` is terminal: nothing is sent to the connection afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Admitted { room_id: RoomId },
    Closed,
}

impl ConnectionState {
    /// Connecting → Admitted. Returns false for any other starting state.
    pub fn admit(&mut self, room_id: RoomId) -> bool {
        if *self != Self::Connecting {
            return false;
        }
        *self = Self::Admitted { room_id };
        true
    }

    /// Connecting → Closed after a rejected admission.
    pub fn reject(&mut self) -> bool {
        if *self != Self::Connecting {
            return false;
        }
        *self = Self::Closed;
        true
    }

    /// Enter Closed.
    ///
    /// Returns the room to leave when closing from Admitted, so cleanup runs
    /// exactly once per admitted connection.
    pub fn close(&mut self) -> Option<RoomId> {
        match std::mem::replace(self, Self::Closed) {
            Self::Admitted { room_id } => Some(room_id),
            Self::Connecting | Self::Closed => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        *self == Self::Closed
    }
}

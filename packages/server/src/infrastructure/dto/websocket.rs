//! WebSocket message envelope.
//!
//! Every frame is a JSON object tagged by `type`. Client-originated kinds are
//! relayed as the raw text the client sent; this type only decides whether a
//! frame is well-formed and relayable.

use serde::{Deserialize, Serialize};

/// Error text sent to a connection rejected because its room is full
pub const ROOM_FULL_MESSAGE: &str = "Room is full";

/// Player action carried by a `videoEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoAction {
    Play,
    Pause,
    Seek,
    Ended,
    LoadVideo,
    Sync,
}

/// Message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Envelope {
    /// Sent once by a newly connected client (informational)
    InitialJoin {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
    },
    ChatMessage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
    },
    VideoEvent {
        action: VideoAction,
        /// Playback position in seconds
        time: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_state: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        video_id: Option<String>,
        /// Receivers drop events carrying their own id
        sender_id: String,
    },
    UserJoined {
        username: String,
    },
    UserLeft {
        username: String,
    },
    RoomInfo {
        users_in_room: usize,
    },
    Error {
        message: String,
    },
}

impl Envelope {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn user_joined(username: impl Into<String>) -> Self {
        Self::UserJoined {
            username: username.into(),
        }
    }

    pub fn user_left(username: impl Into<String>) -> Self {
        Self::UserLeft {
            username: username.into(),
        }
    }

    pub fn room_info(users_in_room: usize) -> Self {
        Self::RoomInfo { users_in_room }
    }

    pub fn room_full() -> Self {
        Self::Error {
            message: ROOM_FULL_MESSAGE.to_string(),
        }
    }

    /// Whether a client may send this kind for relaying.
    ///
    /// Join/leave/roomInfo/error are server-synthesized only.
    pub fn is_relayable(&self) -> bool {
        matches!(
            self,
            Self::InitialJoin { .. } | Self::ChatMessage { .. } | Self::VideoEvent { .. }
        )
    }

    /// The `type` discriminator, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitialJoin { .. } => "initialJoin",
            Self::ChatMessage { .. } => "chatMessage",
            Self::VideoEvent { .. } => "videoEvent",
            Self::UserJoined { .. } => "userJoined",
            Self::UserLeft { .. } => "userLeft",
            Self::RoomInfo { .. } => "roomInfo",
            Self::Error { .. } => "error",
        }
    }
}

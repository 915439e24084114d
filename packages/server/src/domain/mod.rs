//! Domain layer for the relay.
//!
//! This module contains room membership rules that are independent of
//! the wire format and transport concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Member, ROOM_CAPACITY, Room};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::{Admitted, ClientSender, Departure, Recipient, RoomRepository};
pub use value_object::{ConnectionId, DEFAULT_ROOM_ID, DisplayLabel, RoomId, Timestamp};

#[cfg(test)]
pub use repository::MockRoomRepository;

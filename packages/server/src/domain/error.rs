//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Room capacity reached; the admission is rejected, not queued
    #[error("Room is full: maximum {capacity} members allowed")]
    Full { capacity: usize },
}

/// Errors returned by a RoomRepository implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Room '{0}' is full")]
    RoomFull(RoomId),

    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(ConnectionId),

    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),
}

//! Two-party room relay library.
//!
//! Clients join a named room over a WebSocket and the server forwards what one
//! member sends to the other member of the same room, with join/leave
//! notifications.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::run as run_server;

//! Handler modules for WebSocket endpoints.

pub mod connection;
pub mod websocket;

pub use connection::ConnectionState;
pub use websocket::websocket_handler;

//! WebSocket relay server implementation.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use handler::ConnectionState;
pub use runner::{build_app, run, serve};
pub use signal::shutdown_signal;

//! Two-party room relay server.
//!
//! Forwards each message a client sends to the other member of its room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sofa-server -- --port 8080
//! ```

use clap::Parser;
use sofa_server::config::ServerConfig;
use sofa_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);
    tracing::info!("Starting server with {:?}", config);

    // Run the server
    if let Err(e) = sofa_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Presence-tracking chat hub server.
//!
//! Clients join with a display name, then every chat message and every
//! arrival or departure is broadcast to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin murmur-server
//! cargo run --bin murmur-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use murmur_server::{
    config::{DEFAULT_CORS_ORIGIN, DEFAULT_OUTBOUND_BUFFER, DEFAULT_PORT, ServerConfig},
    infrastructure::{
        broadcaster::WebSocketEventBroadcaster, registry::InMemoryConnectionRegistry,
    },
    ui::Server,
    usecase::{ListParticipantsUseCase, SerialGate, SessionLifecycle},
};
use murmur_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "murmur-server")]
#[command(about = "Presence-tracking chat hub over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "MURMUR_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Frames each client may fall behind before new events to it are dropped
    #[arg(long, env = "MURMUR_OUTBOUND_BUFFER", default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,

    /// Browser origin allowed to call the HTTP API
    #[arg(long, env = "MURMUR_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    cors_origin: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::new(args.host, args.port, args.outbound_buffer)
        .with_cors_origin(args.cors_origin);
    tracing::info!("Starting with {}", config);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Broadcaster
    // 3. UseCases (sharing one gate)
    // 4. Server

    // 1. Create Registry (in-memory, empty at startup)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create Broadcaster (WebSocket implementation)
    let broadcaster = Arc::new(WebSocketEventBroadcaster::new());

    // 3. Create UseCases
    let gate = Arc::new(SerialGate::new());
    let lifecycle = Arc::new(SessionLifecycle::from_parts(
        registry.clone(),
        broadcaster,
        Arc::new(SystemClock),
        gate.clone(),
    ));
    let list_participants_usecase = Arc::new(ListParticipantsUseCase::new(registry, gate));

    // 4. Create and run the server
    let server = Server::new(lifecycle, list_participants_usecase, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

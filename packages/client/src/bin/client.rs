//! Terminal chat client for the Murmur hub.
//!
//! Joins the chat under a display name, sends every line typed on stdin as a
//! chat message and prints arrivals, departures and messages as they happen.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin murmur-client -- --username Alice
//! cargo run --bin murmur-client -- -u Bob --url ws://127.0.0.1:4000/ws
//! ```

use clap::Parser;

use murmur_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "murmur-client")]
#[command(about = "Terminal client for the Murmur chat hub", long_about = None)]
struct Args {
    /// Display name shown to other participants
    #[arg(short = 'u', long)]
    username: String,

    /// WebSocket endpoint of the hub
    #[arg(long, env = "MURMUR_URL", default_value = "ws://127.0.0.1:4000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = murmur_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

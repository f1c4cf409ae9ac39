//! Hackroom terminal client.
//!
//! Joins a room and relays typed lines as chat messages or commands
//! (`/timer`, `/note`, `/unnote`, `/leave`, `/quit`, `/help`). Reconnects up
//! to 5 times, 5 seconds apart, unless the server rejected the username.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hackroom-client -- --room abc123 --username alice
//! cargo run --bin hackroom-client -- -r abc123 -n bob -u ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;

use hackroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hackroom-client")]
#[command(about = "Terminal client for Hackroom rooms", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name (must be unique within the room)
    #[arg(short = 'n', long)]
    username: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hackroom_client::run_client(args.url, args.room, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

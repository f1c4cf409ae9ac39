//! Hackroom collaboration server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hackroom-server
//! cargo run --bin hackroom-server -- --host 0.0.0.0 --port 3000 --upload-dir /var/lib/hackroom
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use hackroom_server::{
    config::{
        DEFAULT_HISTORY_LIMIT, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TICK_INTERVAL_MS,
        DEFAULT_UPLOAD_DIR, ServerConfig,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryFileRepository, InMemoryMessageRepository, InMemoryNoteRepository,
            InMemoryRoomRegistry, InMemoryTimerRepository,
        },
        storage::LocalBlobStore,
    },
    ui::{AppState, Server},
    usecase::{RoomStores, TimerTickUseCase},
};
use hackroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hackroom-server")]
#[command(about = "Hackroom collaboration server (timer, chat, notes, files)", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HACKROOM_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HACKROOM_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory uploaded files are stored in
    #[arg(long, env = "HACKROOM_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    /// Timer tick period in milliseconds
    #[arg(
        long,
        env = "HACKROOM_TICK_INTERVAL_MS",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_interval_ms: u64,

    /// Number of chat messages replayed to a joining participant
    #[arg(long, env = "HACKROOM_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            upload_dir: args.upload_dir,
            tick_interval: Duration::from_millis(args.tick_interval_ms),
            history_limit: args.history_limit,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("{:?}", config);

    // Initialize dependencies in order:
    // 1. Registry / Repositories / BlobStore
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create stores (in-memory records, uploads on disk)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let stores = RoomStores {
        timers: Arc::new(InMemoryTimerRepository::new()),
        messages: Arc::new(InMemoryMessageRepository::new()),
        notes: Arc::new(InMemoryNoteRepository::new()),
        files: Arc::new(InMemoryFileRepository::new()),
    };
    let blobs = match LocalBlobStore::open(config.upload_dir.clone()).await {
        Ok(blobs) => Arc::new(blobs),
        Err(e) => {
            tracing::error!("Cannot use upload directory {:?}: {}", config.upload_dir, e);
            std::process::exit(1);
        }
    };
    let clock = Arc::new(SystemClock);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let tick_usecase = TimerTickUseCase::new(
        registry.clone(),
        stores.timers.clone(),
        message_pusher.clone(),
        clock.clone(),
    );
    let app_state = AppState::new(
        registry,
        stores,
        blobs,
        message_pusher,
        clock,
        config.history_limit,
    );

    // 4. Create and run the server
    let server = Server::new(config, app_state, tick_usecase);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

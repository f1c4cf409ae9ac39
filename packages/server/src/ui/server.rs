//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, usecase::TimerTickUseCase};

use super::{
    handler::{
        delete_file, download_file, get_file_url, get_rooms, health_check, room_exists,
        upload_file, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
    ticker::spawn_ticker,
};

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the HTTP + WebSocket router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}/exists", get(room_exists))
        .route(
            "/api/files",
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/files/{file_id}", delete(delete_file))
        .route("/api/files/{file_id}/url", get(get_file_url))
        .route("/api/files/{file_id}/download", get(download_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Collaboration server
///
/// ```ignore
/// let server = Server::new(config, app_state, tick_usecase);
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
    tick_usecase: Arc<TimerTickUseCase>,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState, tick_usecase: TimerTickUseCase) -> Self {
        Self {
            config,
            state: Arc::new(state),
            tick_usecase: Arc::new(tick_usecase),
        }
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Hackroom server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticker = spawn_ticker(self.tick_usecase, self.config.tick_interval);
        let app = router(self.state);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        ticker.abort();
        result
    }
}

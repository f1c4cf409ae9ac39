//! UI layer: Axum router, HTTP / WebSocket handlers and the tick task.

pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;
mod ticker;

pub use server::{MAX_UPLOAD_BYTES, Server, router};
pub use state::AppState;

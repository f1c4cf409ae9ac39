//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{
    delete_file, download_file, get_file_url, get_rooms, health_check, room_exists, upload_file,
};
pub use websocket::websocket_handler;

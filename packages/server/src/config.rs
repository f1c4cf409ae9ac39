//! Server configuration.

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Settings handed from the binary's command line to [`crate::ui::Server`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploaded files are stored in
    pub upload_dir: PathBuf,
    /// Period of the timer tick
    pub tick_interval: Duration,
    /// Number of chat messages replayed to a joining participant
    pub history_limit: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

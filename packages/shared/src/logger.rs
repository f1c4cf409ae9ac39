//! Logging setup utilities for the Hackroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Workspace crates whose logs are enabled by the default filter.
const WORKSPACE_CRATES: [&str; 3] = ["hackroom_shared", "hackroom_server", "hackroom_client"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Binary names may contain `-`, which `EnvFilter` targets never do, so they are
/// normalized the same way rustc normalizes crate names.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    WORKSPACE_CRATES
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for the workspace crates and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hackroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hackroom_shared::logger::setup_logger;
///
/// setup_logger("hackroom-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger initialized for '{}'", binary_name);
}

//! Domain logic for client-side operations.
//!
//! Pure functions deciding reconnects and what is worth printing, kept free of
//! I/O so they are easy to test.

use hackroom_server::infrastructure::dto::websocket::{TimerDto, TimerStatusDto};

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A rejected username will be rejected again on every retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::UsernameRejected(_) | ClientError::Encode(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Whether a `timer:update` is worth printing.
///
/// While a timer runs the server pushes one update per second with an
/// unchanged version; only persisted changes (new version or status) are shown.
pub fn should_display_timer(previous: Option<&TimerDto>, update: &TimerDto) -> bool {
    match previous {
        None => true,
        Some(previous) => {
            previous.version != update.version || previous.status != update.status
        }
    }
}

/// `mm:ss`, with minutes growing past 59 as needed
pub fn format_remaining(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn status_label(status: TimerStatusDto) -> &'static str {
    match status {
        TimerStatusDto::Paused => "paused",
        TimerStatusDto::Running => "running",
        TimerStatusDto::Ended => "ended",
    }
}

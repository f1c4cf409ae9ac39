//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    command::Identity,
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::spawn_input_thread,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the terminal client with reconnection logic
pub async fn run_client(url: String, room_id: String, username: String) -> Result<(), ClientError> {
    let identity = Identity::new(room_id, username);
    let prompt = format!("{}@{}> ", identity.username, identity.room_id);
    let mut input = spawn_input_thread(prompt.clone());
    let mut failures = 0;

    loop {
        tracing::info!(
            "Connecting to {} as '{}' in room '{}' (attempt {}/{})",
            url,
            identity.username,
            identity.room_id,
            failures + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &identity, &prompt, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                failures += 1;

                if !should_attempt_reconnect(&e, failures, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    failures + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: one reading client frames and dispatching
//! them to the use cases, and one draining the connection's outbound channel
//! into the socket. When either ends, the other is aborted and the connection
//! is removed from every room it joined.

use std::{error::Error, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ErrorScope, TimerCommand},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded events from the rx channel and pushes
/// them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connection.open(tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_event(&recv_state, &recv_connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push events from the use cases to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.leave_room.disconnect(&connection_id).await;
    state.connection.close(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Parse one client frame and run the matching use case.
async fn handle_event(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Unparseable frame from '{}': {}", connection_id, e);
            let message = format!("Invalid event: {}", e);
            state
                .connection
                .report_error(connection_id, ErrorScope::Request, message)
                .await;
            return;
        }
    };
    tracing::debug!("Event from '{}': {:?}", connection_id, event);

    match event {
        ClientEvent::CheckUsername(p) => {
            state
                .check_username
                .execute(connection_id, p.room_id, p.username)
                .await;
        }
        ClientEvent::JoinRoom(p) => {
            let result = state
                .join_room
                .execute(connection_id, p.room_id, p.username)
                .await;
            reply(state, connection_id, ErrorScope::JoinRoom, result).await;
        }
        ClientEvent::LeaveRoom(p) => {
            state.leave_room.leave(connection_id, p.room_id).await;
        }
        ClientEvent::Message(p) => {
            let result = state
                .send_message
                .execute(p.room_id, p.username, p.message)
                .await;
            reply(state, connection_id, ErrorScope::Message, result).await;
        }
        ClientEvent::TimerSet(p) => {
            // Negative durations become 0 and fail validation
            let total_seconds = u64::try_from(p.total_seconds).unwrap_or(0);
            let command = TimerCommand::Set { total_seconds };
            run_timer(state, connection_id, p.room_id, command).await;
        }
        ClientEvent::TimerStart(p) => {
            run_timer(state, connection_id, p.room_id, TimerCommand::Start).await;
        }
        ClientEvent::TimerPause(p) => {
            run_timer(state, connection_id, p.room_id, TimerCommand::Pause).await;
        }
        ClientEvent::TimerResume(p) => {
            run_timer(state, connection_id, p.room_id, TimerCommand::Resume).await;
        }
        ClientEvent::TimerReset(p) => {
            run_timer(state, connection_id, p.room_id, TimerCommand::Reset).await;
        }
        ClientEvent::NoteAdd(p) => {
            let result = state.note.add(p.room_id, p.username, p.content).await;
            reply(state, connection_id, ErrorScope::Note, result).await;
        }
        ClientEvent::NoteDelete(p) => {
            let result = state.note.delete(p.room_id, &p.note_id).await;
            reply(state, connection_id, ErrorScope::Note, result).await;
        }
    }
}

async fn run_timer(
    state: &AppState,
    connection_id: &ConnectionId,
    room_id: String,
    command: TimerCommand,
) {
    let result = state.timer.execute(connection_id, room_id, command).await;
    reply(state, connection_id, ErrorScope::Timer, result).await;
}

/// Send the failure of a request back to its originator.
async fn reply<T, E>(
    state: &AppState,
    connection_id: &ConnectionId,
    scope: ErrorScope,
    result: Result<T, E>,
) where
    E: Error,
{
    if let Err(e) = result {
        tracing::warn!("{:?} request from '{}' failed: {:?}", scope, connection_id, e);
        state
            .connection
            .report_error(connection_id, scope, e.to_string())
            .await;
    }
}

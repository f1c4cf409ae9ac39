//! Fixtures shared by the use case tests.

use std::sync::Arc;

use hackroom_shared::time::{Clock, ManualClock};
use serde_json::Value;
use tokio::sync::mpsc;

use super::RoomStores;
use crate::{
    domain::{ConnectionId, MessagePusher, Participant, RoomId, RoomRegistry, Timestamp, Username},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryFileRepository, InMemoryMessageRepository, InMemoryNoteRepository,
            InMemoryRoomRegistry, InMemoryTimerRepository,
        },
        storage::InMemoryBlobStore,
    },
};

pub const T0: i64 = 1_700_000_000_000;

pub struct Fixture {
    pub registry: Arc<InMemoryRoomRegistry>,
    pub timers: Arc<InMemoryTimerRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub notes: Arc<InMemoryNoteRepository>,
    pub files: Arc<InMemoryFileRepository>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryRoomRegistry::new()),
            timers: Arc::new(InMemoryTimerRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            notes: Arc::new(InMemoryNoteRepository::new()),
            files: Arc::new(InMemoryFileRepository::new()),
            blobs: Arc::new(InMemoryBlobStore::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(ManualClock::new(T0)),
        }
    }

    pub fn stores(&self) -> RoomStores {
        RoomStores {
            timers: self.timers.clone(),
            messages: self.messages.clone(),
            notes: self.notes.clone(),
            files: self.files.clone(),
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Register a connection with the pusher and return its outbound queue
    pub async fn connect(&self, connection_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(conn(connection_id), tx).await;
        rx
    }

    /// Put a connection straight into a room's roster
    pub async fn seat(&self, room: &str, connection_id: &str, username: &str) {
        let participant = Participant::new(
            conn(connection_id),
            Username::new(username.to_string()).unwrap(),
            Timestamp::new(self.clock.now_millis()),
        );
        self.registry
            .join(&room_id(room), participant)
            .await
            .unwrap();
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

/// Everything queued for a connection so far, decoded
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}

pub fn event_types(events: &[Value]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["type"].as_str().unwrap_or_default().to_string())
        .collect()
}

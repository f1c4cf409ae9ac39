//! Room-scoped delivery shared by the use cases.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRegistry};

/// Resolves room membership and hands events to the pusher.
///
/// Delivery failures are logged, never returned: a socket closing mid-send
/// must not fail the operation that produced the event.
#[derive(Clone)]
pub struct RoomNotifier {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomNotifier {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn to_connection(&self, connection_id: &ConnectionId, event: &RoomEvent) {
        if let Err(e) = self.message_pusher.push_to(connection_id, event).await {
            tracing::warn!("Failed to push event to connection '{}': {}", connection_id, e);
        }
    }

    /// Broadcast to every connection in the room; returns how many were targeted.
    pub async fn to_room(&self, room_id: &RoomId, event: &RoomEvent) -> usize {
        let targets = self.registry.connection_ids(room_id).await;
        if targets.is_empty() {
            return 0;
        }
        let count = targets.len();
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast to room '{}': {}", room_id, e);
        }
        count
    }
}

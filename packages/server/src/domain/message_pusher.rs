//! MessagePusher trait
//!
//! Delivery port for outbound events. Use cases address connections by id and
//! never see sockets; the infrastructure layer owns the channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent};

/// Per-connection outbound channel carrying encoded frames
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound channel of a freshly upgraded connection
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Send one event to one connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Send one event to many connections; individual delivery failures are
    /// logged and skipped.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}

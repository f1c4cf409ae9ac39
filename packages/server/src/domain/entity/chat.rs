//! Chat message entity

use crate::domain::value_object::{MessageContent, RoomId, Timestamp, Username};

/// A message posted to a room, including server-generated notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub username: Username,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        room_id: RoomId,
        username: Username,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            room_id,
            username,
            content,
            timestamp,
        }
    }

    /// A notice authored by `System`, e.g. "alice has joined the room".
    pub fn system(room_id: RoomId, text: String, timestamp: Timestamp) -> Self {
        Self::new(
            room_id,
            Username::system(),
            MessageContent::notice(text),
            timestamp,
        )
    }

    pub fn is_system(&self) -> bool {
        self.username == Username::system()
    }
}

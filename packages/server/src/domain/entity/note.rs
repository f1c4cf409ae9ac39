//! Sticky note entity

use crate::domain::value_object::{MessageContent, NoteId, RoomId, Timestamp, Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub room_id: RoomId,
    pub username: Username,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl Note {
    /// Create a note with a freshly generated id
    pub fn new(
        room_id: RoomId,
        username: Username,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: NoteId::generate(),
            room_id,
            username,
            content,
            timestamp,
        }
    }
}

//! Events pushed from the server to connected clients.
//!
//! Use cases decide *what* a room hears; the message pusher decides how it is
//! encoded on the wire.

use super::{
    entity::{ChatMessage, Note, SharedFile, Timer},
    value_object::{FileId, NoteId},
};

/// Which inbound event class an error answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    JoinRoom,
    Message,
    Timer,
    Note,
    File,
    /// Frame could not be parsed at all
    Request,
}

/// Outbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    UsernameResponse { valid: bool, message: String },
    RoomJoined { is_new_room: bool },
    Message(ChatMessage),
    MessageHistory(Vec<ChatMessage>),
    TimerUpdate(Timer),
    NotesHistory(Vec<Note>),
    NoteAdded(Note),
    NoteDeleted { note_id: NoteId },
    FilesList(Vec<SharedFile>),
    FileAdded(SharedFile),
    FileRemoved { file_id: FileId },
    Error { scope: ErrorScope, message: String },
}

impl RoomEvent {
    pub fn error(scope: ErrorScope, message: impl Into<String>) -> Self {
        RoomEvent::Error {
            scope,
            message: message.into(),
        }
    }
}

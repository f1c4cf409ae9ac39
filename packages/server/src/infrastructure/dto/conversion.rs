//! Conversion logic from domain entities and events to wire DTOs.

use crate::domain::{ChatMessage, ErrorScope, Note, RoomEvent, SharedFile, Timer, TimerStatus};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            room_id: model.room_id.as_str().to_string(),
            username: model.username.as_str().to_string(),
            message: model.content.as_str().to_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<TimerStatus> for dto::TimerStatusDto {
    fn from(status: TimerStatus) -> Self {
        match status {
            TimerStatus::Paused => dto::TimerStatusDto::Paused,
            TimerStatus::Running => dto::TimerStatusDto::Running,
            TimerStatus::Ended => dto::TimerStatusDto::Ended,
        }
    }
}

impl From<&Timer> for dto::TimerDto {
    fn from(model: &Timer) -> Self {
        Self {
            room_id: model.room_id.as_str().to_string(),
            status: model.status.into(),
            remaining_time: model.remaining_time,
            start_time: model.start_time.map(|t| t.value()),
            last_update_by: model.last_update_by.clone(),
            log: model
                .log
                .iter()
                .map(|entry| dto::TimerLogEntryDto {
                    action: entry.action.as_str().to_string(),
                    actor: entry.actor.clone(),
                    timestamp: entry.timestamp.value(),
                })
                .collect(),
            version: model.version,
        }
    }
}

impl From<&Note> for dto::NoteDto {
    fn from(model: &Note) -> Self {
        Self {
            id: model.id.to_string(),
            room_id: model.room_id.as_str().to_string(),
            username: model.username.as_str().to_string(),
            content: model.content.as_str().to_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<&SharedFile> for dto::FileDto {
    fn from(model: &SharedFile) -> Self {
        Self {
            id: model.id.to_string(),
            room_id: model.room_id.as_str().to_string(),
            uploaded_by: model.uploaded_by.as_str().to_string(),
            filename: model.stored_name.clone(),
            original_name: model.original_name.clone(),
            size: model.size,
            mimetype: model.mimetype.clone(),
            upload_date: model.upload_date.value(),
        }
    }
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<&RoomEvent> for dto::ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        use dto::ServerEvent as E;

        match event {
            RoomEvent::UsernameResponse { valid, message } => {
                E::UsernameResponse(dto::UsernameResponseDto {
                    valid: *valid,
                    message: message.clone(),
                })
            }
            RoomEvent::RoomJoined { is_new_room } => E::RoomJoined(dto::RoomJoinedDto {
                is_new_room: *is_new_room,
            }),
            RoomEvent::Message(message) => E::Message(message.into()),
            RoomEvent::MessageHistory(messages) => {
                E::MessageHistory(messages.iter().map(Into::into).collect())
            }
            RoomEvent::TimerUpdate(timer) => E::TimerUpdate(timer.into()),
            RoomEvent::NotesHistory(notes) => {
                E::NotesHistory(notes.iter().map(Into::into).collect())
            }
            RoomEvent::NoteAdded(note) => E::NoteAdded(note.into()),
            RoomEvent::NoteDeleted { note_id } => E::NoteDeleted(dto::NoteDeletedDto {
                note_id: note_id.to_string(),
            }),
            RoomEvent::FilesList(files) => E::FilesList(files.iter().map(Into::into).collect()),
            RoomEvent::FileAdded(file) => E::FileAdded(file.into()),
            RoomEvent::FileRemoved { file_id } => E::FileRemoved(dto::FileRemovedDto {
                file_id: file_id.to_string(),
            }),
            RoomEvent::Error { scope, message } => {
                let body = dto::ErrorDto {
                    error: message.clone(),
                };
                match scope {
                    ErrorScope::JoinRoom => E::JoinRoomError(body),
                    ErrorScope::Message => E::MessageError(body),
                    ErrorScope::Timer => E::TimerError(body),
                    ErrorScope::Note => E::NoteError(body),
                    ErrorScope::File => E::FileError(body),
                    ErrorScope::Request => E::RequestError(body),
                }
            }
        }
    }
}

/// Encode an event as one WebSocket text frame
pub fn encode_event(event: &RoomEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerEvent::from(event))
}

//! WebSocket event DTOs.
//!
//! Every frame is a JSON object `{"type": "<event>", "data": {...}}`. Field
//! names are camelCase and timestamps are Unix epoch milliseconds.

use serde::{Deserialize, Serialize};

// ========================================
// Client → Server
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUserPayload {
    pub room_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomPayload {
    pub room_id: String,
    /// Informational; the server uses the name the connection joined with
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub room_id: String,
    pub message: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSetPayload {
    pub room_id: String,
    /// Signed so that negative durations reach validation instead of failing to parse
    pub total_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteAddPayload {
    pub room_id: String,
    pub username: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDeletePayload {
    pub room_id: String,
    pub note_id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Inbound event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "username:check")]
    CheckUsername(RoomUserPayload),
    #[serde(rename = "joinRoom")]
    JoinRoom(RoomUserPayload),
    #[serde(rename = "leaveRoom")]
    LeaveRoom(LeaveRoomPayload),
    #[serde(rename = "message")]
    Message(MessagePayload),
    #[serde(rename = "timer:set")]
    TimerSet(TimerSetPayload),
    #[serde(rename = "timer:start")]
    TimerStart(RoomPayload),
    #[serde(rename = "timer:pause")]
    TimerPause(RoomPayload),
    #[serde(rename = "timer:resume")]
    TimerResume(RoomPayload),
    #[serde(rename = "timer:reset")]
    TimerReset(RoomPayload),
    #[serde(rename = "note:add")]
    NoteAdd(NoteAddPayload),
    #[serde(rename = "note:delete")]
    NoteDelete(NoteDeletePayload),
}

// ========================================
// Server → Client
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameResponseDto {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedDto {
    pub is_new_room: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub room_id: String,
    pub username: String,
    pub message: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatusDto {
    Paused,
    Running,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerLogEntryDto {
    pub action: String,
    pub actor: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDto {
    pub room_id: String,
    pub status: TimerStatusDto,
    pub remaining_time: u64,
    pub start_time: Option<i64>,
    pub last_update_by: String,
    pub log: Vec<TimerLogEntryDto>,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: String,
    pub room_id: String,
    pub username: String,
    pub content: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDeletedDto {
    pub note_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub id: String,
    pub room_id: String,
    pub uploaded_by: String,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mimetype: String,
    pub upload_date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRemovedDto {
    pub file_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Outbound event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "username:response")]
    UsernameResponse(UsernameResponseDto),
    #[serde(rename = "room:joined")]
    RoomJoined(RoomJoinedDto),
    #[serde(rename = "message")]
    Message(ChatMessageDto),
    #[serde(rename = "message:history")]
    MessageHistory(Vec<ChatMessageDto>),
    #[serde(rename = "timer:update")]
    TimerUpdate(TimerDto),
    #[serde(rename = "notes:history")]
    NotesHistory(Vec<NoteDto>),
    #[serde(rename = "note:added")]
    NoteAdded(NoteDto),
    #[serde(rename = "note:deleted")]
    NoteDeleted(NoteDeletedDto),
    #[serde(rename = "files:list")]
    FilesList(Vec<FileDto>),
    #[serde(rename = "file:added")]
    FileAdded(FileDto),
    #[serde(rename = "file:removed")]
    FileRemoved(FileRemovedDto),
    #[serde(rename = "joinRoom:error")]
    JoinRoomError(ErrorDto),
    #[serde(rename = "message:error")]
    MessageError(ErrorDto),
    #[serde(rename = "timer:error")]
    TimerError(ErrorDto),
    #[serde(rename = "note:error")]
    NoteError(ErrorDto),
    #[serde(rename = "file:error")]
    FileError(ErrorDto),
    #[serde(rename = "request:error")]
    RequestError(ErrorDto),
}

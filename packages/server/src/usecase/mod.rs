//! UseCase 層
//!
//! 受信イベント / HTTP リクエスト 1 つにつき 1 つのユースケースを実行します。
//! 各ユースケースは domain の trait（`Arc<dyn Trait>`）だけに依存し、
//! 具体的なストアや WebSocket の実装は知りません。

pub mod check_username;
pub mod connection;
pub mod error;
pub mod file;
pub mod join_room;
pub mod leave_room;
pub mod note;
pub mod notifier;
pub mod room_query;
pub mod send_message;
pub mod tick;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use crate::domain::{
    FileRepository, MessageRepository, NoteRepository, RepositoryError, RoomId, TimerRepository,
};

pub use check_username::CheckUsernameUseCase;
pub use connection::ConnectionUseCase;
pub use error::{FileError, JoinRoomError, NoteError, SendMessageError, TimerCommandError};
pub use file::{FileShareUseCase, FileUpload};
pub use join_room::{JoinReport, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use note::NoteUseCase;
pub use notifier::RoomNotifier;
pub use room_query::RoomQueryUseCase;
pub use send_message::SendMessageUseCase;
pub use tick::{TickReport, TimerTickUseCase};
pub use timer::{MAX_CAS_ATTEMPTS, TimerCommandUseCase};

/// Persistent records scoped to a room
#[derive(Clone)]
pub struct RoomStores {
    pub timers: Arc<dyn TimerRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub files: Arc<dyn FileRepository>,
}

impl RoomStores {
    /// `true` when any message, file, timer or note was ever stored for the room
    pub async fn has_data(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        Ok(self.messages.exists(room_id).await?
            || self.files.exists(room_id).await?
            || self.timers.exists(room_id).await?
            || self.notes.exists(room_id).await?)
    }
}

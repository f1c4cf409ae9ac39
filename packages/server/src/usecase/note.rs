//! UseCase: 付箋ノートの追加・削除

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    MessageContent, MessagePusher, Note, NoteId, NoteRepository, RoomEvent, RoomId, RoomRegistry,
    Timestamp, Username,
};

use super::{RoomNotifier, error::NoteError};

/// ノート操作のユースケース
pub struct NoteUseCase {
    notes: Arc<dyn NoteRepository>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl NoteUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        notes: Arc<dyn NoteRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notes,
            notifier: RoomNotifier::new(registry, message_pusher),
            clock,
        }
    }

    /// `note:add`: 保存して `note:added` をブロードキャスト
    pub async fn add(
        &self,
        room_id: String,
        username: String,
        content: String,
    ) -> Result<Note, NoteError> {
        let note = Note::new(
            RoomId::new(room_id)?,
            Username::new(username)?,
            MessageContent::new(content)?,
            Timestamp::new(self.clock.now_millis()),
        );
        self.notes.save(note.clone()).await?;
        tracing::debug!("Note {} added to room '{}'", note.id, note.room_id);

        self.notifier
            .to_room(&note.room_id, &RoomEvent::NoteAdded(note.clone()))
            .await;
        Ok(note)
    }

    /// `note:delete`: Room 内のノートを削除して `note:deleted` をブロードキャスト
    pub async fn delete(&self, room_id: String, note_id: &str) -> Result<NoteId, NoteError> {
        let room_id = RoomId::new(room_id)?;
        let note_id = NoteId::parse(note_id)?;

        if !self.notes.delete(&room_id, &note_id).await? {
            return Err(NoteError::NoteNotFound);
        }
        tracing::debug!("Note {} deleted from room '{}'", note_id, room_id);

        self.notifier
            .to_room(&room_id, &RoomEvent::NoteDeleted { note_id })
            .await;
        Ok(note_id)
    }
}

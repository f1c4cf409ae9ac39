//! InMemory Note Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Note, NoteId, NoteRepository, RepositoryError, RoomId};

/// インメモリ Note Repository 実装
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<HashMap<RoomId, Vec<Note>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn save(&self, note: Note) -> Result<(), RepositoryError> {
        let mut notes = self.notes.lock().await;
        notes.entry(note.room_id.clone()).or_default().push(note);
        Ok(())
    }

    async fn delete(&self, room_id: &RoomId, note_id: &NoteId) -> Result<bool, RepositoryError> {
        let mut notes = self.notes.lock().await;
        let Some(room_notes) = notes.get_mut(room_id) else {
            return Ok(false);
        };
        let before = room_notes.len();
        room_notes.retain(|n| &n.id != note_id);
        Ok(room_notes.len() != before)
    }

    async fn list(&self, room_id: &RoomId) -> Result<Vec<Note>, RepositoryError> {
        let notes = self.notes.lock().await;
        let mut listed = notes.get(room_id).cloned().unwrap_or_default();
        listed.reverse();
        listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(listed)
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        let notes = self.notes.lock().await;
        Ok(notes.get(room_id).is_some_and(|n| !n.is_empty()))
    }
}

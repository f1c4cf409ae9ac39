//! InMemory File Repository 実装
//!
//! ファイルのメタデータのみを保持します。中身は BlobStore 側。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{FileId, FileRepository, RepositoryError, RoomId, SharedFile};

/// インメモリ File Repository 実装
#[derive(Default)]
pub struct InMemoryFileRepository {
    files: Mutex<HashMap<FileId, SharedFile>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn save(&self, file: SharedFile) -> Result<(), RepositoryError> {
        self.files.lock().await.insert(file.id, file);
        Ok(())
    }

    async fn find(&self, file_id: &FileId) -> Result<Option<SharedFile>, RepositoryError> {
        Ok(self.files.lock().await.get(file_id).cloned())
    }

    async fn delete(&self, file_id: &FileId) -> Result<Option<SharedFile>, RepositoryError> {
        Ok(self.files.lock().await.remove(file_id))
    }

    async fn list(&self, room_id: &RoomId) -> Result<Vec<SharedFile>, RepositoryError> {
        let files = self.files.lock().await;
        let mut listed: Vec<SharedFile> = files
            .values()
            .filter(|f| &f.room_id == room_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(listed)
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        let files = self.files.lock().await;
        Ok(files.values().any(|f| &f.room_id == room_id))
    }
}

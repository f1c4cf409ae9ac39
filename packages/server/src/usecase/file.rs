//! UseCase: ファイル共有
//!
//! HTTP から呼ばれ、結果を WebSocket で Room に通知します
//! （`file:added` / `file:removed`）。メタデータは FileRepository、
//! 中身は BlobStore に保存します。

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    BlobStore, FileId, FileRepository, MessagePusher, RoomEvent, RoomId, RoomRegistry,
    SharedFile, Timestamp, Username,
};

use super::{RoomNotifier, error::FileError};

/// `POST /api/files` で受け取ったアップロード
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub room_id: String,
    pub username: String,
    pub file_name: String,
    pub mimetype: String,
    pub bytes: Vec<u8>,
}

/// ファイル共有のユースケース
pub struct FileShareUseCase {
    files: Arc<dyn FileRepository>,
    blobs: Arc<dyn BlobStore>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl FileShareUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        files: Arc<dyn FileRepository>,
        blobs: Arc<dyn BlobStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            files,
            blobs,
            notifier: RoomNotifier::new(registry, message_pusher),
            clock,
        }
    }

    /// 中身とメタデータを保存し、Room に `file:added` を送る
    pub async fn upload(&self, upload: FileUpload) -> Result<SharedFile, FileError> {
        let room_id = RoomId::new(upload.room_id)?;
        let uploaded_by = Username::new(upload.username)?;
        let file = SharedFile::new(
            room_id,
            uploaded_by,
            &upload.file_name,
            upload.bytes.len() as u64,
            upload.mimetype,
            Timestamp::new(self.clock.now_millis()),
        );

        self.blobs.put(&file.stored_name, upload.bytes).await?;
        if let Err(e) = self.files.save(file.clone()).await {
            if let Err(cleanup) = self.blobs.delete(&file.stored_name).await {
                tracing::warn!(
                    "Failed to remove orphaned blob '{}': {:?}",
                    file.stored_name,
                    cleanup
                );
            }
            return Err(e.into());
        }
        tracing::info!(
            "'{}' uploaded '{}' ({} bytes) to room '{}'",
            file.uploaded_by,
            file.original_name,
            file.size,
            file.room_id
        );

        self.notifier
            .to_room(&file.room_id, &RoomEvent::FileAdded(file.clone()))
            .await;
        Ok(file)
    }

    /// ダウンロード用のパス
    pub async fn download_url(&self, file_id: &str) -> Result<String, FileError> {
        let file = self.find(file_id).await?;
        Ok(format!("/api/files/{}/download", file.id))
    }

    pub async fn download(&self, file_id: &str) -> Result<(SharedFile, Vec<u8>), FileError> {
        let file = self.find(file_id).await?;
        let bytes = self.blobs.get(&file.stored_name).await?;
        Ok((file, bytes))
    }

    /// 中身が既に無くてもメタデータは削除し、Room に `file:removed` を送る
    pub async fn delete(&self, file_id: &str) -> Result<SharedFile, FileError> {
        let file = self.find(file_id).await?;

        if !self.blobs.delete(&file.stored_name).await? {
            tracing::warn!("Blob '{}' was already gone", file.stored_name);
        }
        let removed = self
            .files
            .delete(&file.id)
            .await?
            .ok_or(FileError::FileNotFound)?;
        tracing::info!("File {} deleted from room '{}'", removed.id, removed.room_id);

        self.notifier
            .to_room(
                &removed.room_id,
                &RoomEvent::FileRemoved {
                    file_id: removed.id,
                },
            )
            .await;
        Ok(removed)
    }

    async fn find(&self, file_id: &str) -> Result<SharedFile, FileError> {
        let file_id = FileId::parse(file_id).map_err(|_| FileError::FileNotFound)?;
        self.files
            .find(&file_id)
            .await?
            .ok_or(FileError::FileNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, repository::MockFileRepository},
        usecase::test_support::{Fixture, T0, drain, event_types, room_id},
    };

    fn usecase(fixture: &Fixture) -> FileShareUseCase {
        FileShareUseCase::new(
            fixture.registry.clone(),
            fixture.files.clone(),
            fixture.blobs.clone(),
            fixture.pusher.clone(),
            fixture.clock(),
        )
    }

    fn upload(name: &str, bytes: &[u8]) -> FileUpload {
        FileUpload {
            room_id: "abc123".to_string(),
            username: "alice".to_string(),
            file_name: name.to_string(),
            mimetype: "text/plain".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_stores_and_announces() {
        // テスト項目: アップロードしたファイルが保存され、Room に file:added が届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;
        fixture.seat("abc123", "c1", "alice").await;

        // when (操作):
        let file = usecase(&fixture)
            .upload(upload("notes.txt", b"hello"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(file.size, 5);
        assert_eq!(file.upload_date, Timestamp::new(T0));
        assert_eq!(fixture.blobs.get(&file.stored_name).await.unwrap(), b"hello");
        let events = drain(&mut rx);
        assert_eq!(event_types(&events), vec!["file:added"]);
        assert_eq!(events[0]["data"]["originalName"], "notes.txt");
        assert_eq!(events[0]["data"]["uploadedBy"], "alice");
    }

    #[tokio::test]
    async fn test_download_returns_bytes() {
        // テスト項目: ダウンロードで元のファイル名と中身が得られる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);
        let file = usecase.upload(upload("slides.pdf", b"%PDF")).await.unwrap();

        // when (操作):
        let (meta, bytes) = usecase.download(&file.id.to_string()).await.unwrap();
        let url = usecase.download_url(&file.id.to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(meta.original_name, "slides.pdf");
        assert_eq!(bytes, b"%PDF");
        assert_eq!(url, format!("/api/files/{}/download", file.id));
    }

    #[tokio::test]
    async fn test_unknown_file_is_not_found() {
        // テスト項目: 存在しない / 不正な ID のファイルは FileNotFound になる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = usecase(&fixture);

        // when (操作):
        let missing = usecase.download_url(&FileId::generate().to_string()).await;
        let garbage = usecase.download_url("../../etc/passwd").await;

        // then (期待する結果):
        assert_eq!(missing, Err(FileError::FileNotFound));
        assert_eq!(garbage, Err(FileError::FileNotFound));
    }

    #[tokio::test]
    async fn test_delete_without_blob_removes_metadata() {
        // テスト項目: 中身が既に無いファイルでもメタデータは削除され、file:removed が届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;
        fixture.seat("abc123", "c1", "alice").await;
        let usecase = usecase(&fixture);
        let file = usecase.upload(upload("notes.txt", b"hello")).await.unwrap();
        fixture.blobs.delete(&file.stored_name).await.unwrap();
        drain(&mut rx);

        // when (操作):
        let removed = usecase.delete(&file.id.to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(removed.id, file.id);
        assert!(fixture.files.list(&room_id("abc123")).await.unwrap().is_empty());
        let events = drain(&mut rx);
        assert_eq!(events[0]["type"], "file:removed");
        assert_eq!(events[0]["data"]["fileId"], file.id.to_string());
    }

    #[tokio::test]
    async fn test_failed_metadata_save_removes_blob() {
        // テスト項目: メタデータの保存に失敗したら保存済みの中身も削除される
        // given (前提条件):
        let fixture = Fixture::new();
        let mut files = MockFileRepository::new();
        files
            .expect_save()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let usecase = FileShareUseCase::new(
            fixture.registry.clone(),
            Arc::new(files),
            fixture.blobs.clone(),
            fixture.pusher.clone(),
            fixture.clock(),
        );

        // when (操作):
        let result = usecase.upload(upload("notes.txt", b"hello")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(FileError::Repository(_))));
        assert_eq!(fixture.blobs.len().await, 0);
    }

    #[tokio::test]
    async fn test_upload_without_username_is_rejected() {
        // テスト項目: ユーザー名の無いアップロードは検証エラーになる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut request = upload("notes.txt", b"hello");
        request.username = String::new();

        // when (操作):
        let result = usecase(&fixture).upload(request).await;

        // then (期待する結果):
        assert!(matches!(result, Err(FileError::InvalidInput(_))));
    }
}

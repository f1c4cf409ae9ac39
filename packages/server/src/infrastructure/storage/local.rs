//! Local-disk BlobStore

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::domain::{BlobStore, RepositoryError};

/// Stores each blob as one file under `root`
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create the store, creating `root` if it does not exist yet.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            RepositoryError::Unavailable(format!(
                "cannot create upload directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        tracing::info!("Storing uploaded files under '{}'", root.display());
        Ok(Self { root })
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, RepositoryError> {
        // blob names are generated server-side; anything path-like is a bug
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(RepositoryError::NotFound(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), RepositoryError> {
        let path = self.path_of(name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| RepositoryError::Unavailable(format!("write '{}': {}", name, e)))
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, RepositoryError> {
        let path = self.path_of(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(RepositoryError::NotFound(name.to_string()))
            }
            Err(e) => Err(RepositoryError::Unavailable(format!(
                "read '{}': {}",
                name, e
            ))),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let path = self.path_of(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RepositoryError::Unavailable(format!(
                "delete '{}': {}",
                name, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> LocalBlobStore {
        let dir = std::env::temp_dir().join(format!("hackroom-blobs-{}", uuid::Uuid::new_v4()));
        LocalBlobStore::open(dir).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        // テスト項目: 保存したファイルを読み出し、削除できる
        // given (前提条件):
        let store = temp_store().await;
        store.put("a.txt", b"hello".to_vec()).await.unwrap();

        // when (操作):
        let read = store.get("a.txt").await.unwrap();
        let deleted = store.delete("a.txt").await.unwrap();
        let deleted_again = store.delete("a.txt").await.unwrap();

        // then (期待する結果):
        assert_eq!(read, b"hello");
        assert!(deleted);
        assert!(!deleted_again);
        let _ = tokio::fs::remove_dir_all(&store.root).await;
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        // テスト項目: 存在しないファイルの読み出しは NotFound
        // given (前提条件):
        let store = temp_store().await;

        // when (操作):
        let result = store.get("missing.txt").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::NotFound("missing.txt".to_string()))
        );
        let _ = tokio::fs::remove_dir_all(&store.root).await;
    }

    #[tokio::test]
    async fn test_path_like_names_are_refused() {
        // テスト項目: パスを含む名前ではアップロードディレクトリの外に書き込めない
        // given (前提条件):
        let store = temp_store().await;

        // when (操作):
        let result = store.put("../escape.txt", b"x".to_vec()).await;

        // then (期待する結果):
        assert!(result.is_err());
        let _ = tokio::fs::remove_dir_all(&store.root).await;
    }
}

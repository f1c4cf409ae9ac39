//! HashMap-backed BlobStore

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BlobStore, RepositoryError};

#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.lock().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), RepositoryError> {
        self.blobs.lock().await.insert(name.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, RepositoryError> {
        self.blobs
            .lock()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.blobs.lock().await.remove(name).is_some())
    }
}

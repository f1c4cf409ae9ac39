//! InMemory Message Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository, RepositoryError, RoomId};

/// インメモリ Message Repository 実装
///
/// Room ごとに投稿順でメッセージを保持します。
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<HashMap<RoomId, Vec<ChatMessage>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages
            .entry(message.room_id.clone())
            .or_default()
            .push(message);
        Ok(())
    }

    async fn recent(
        &self,
        room_id: &RoomId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let Some(history) = messages.get(room_id) else {
            return Ok(Vec::new());
        };
        let mut sorted = history.clone();
        // stable: same-millisecond messages keep posting order
        sorted.sort_by_key(|m| m.timestamp);
        let skip = sorted.len().saturating_sub(limit);
        Ok(sorted.into_iter().skip(skip).collect())
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages.get(room_id).is_some_and(|m| !m.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, Timestamp, Username};

    fn message(room: &str, text: &str, at: i64) -> ChatMessage {
        ChatMessage::new(
            RoomId::new(room.to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
            MessageContent::new(text.to_string()).unwrap(),
            Timestamp::new(at),
        )
    }

    #[tokio::test]
    async fn test_recent_returns_latest_oldest_first() {
        // テスト項目: recent は最新 N 件を古い順に返す
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        for (i, at) in [30, 10, 20, 40].into_iter().enumerate() {
            repo.save(message("r1", &format!("m{}", i), at)).await.unwrap();
        }

        // when (操作):
        let room_id = RoomId::new("r1".to_string()).unwrap();
        let recent = repo.recent(&room_id, 3).await.unwrap();

        // then (期待する結果):
        let stamps: Vec<i64> = recent.iter().map(|m| m.timestamp.value()).collect();
        assert_eq!(stamps, vec![20, 30, 40]);
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: 他の Room のメッセージは含まれない
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        repo.save(message("r1", "hello", 1)).await.unwrap();

        // when (操作):
        let other = RoomId::new("r2".to_string()).unwrap();
        let recent = repo.recent(&other, 100).await.unwrap();
        let exists = repo.exists(&other).await.unwrap();

        // then (期待する結果):
        assert!(recent.is_empty());
        assert!(!exists);
    }
}

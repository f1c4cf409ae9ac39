//! InMemory Timer Repository 実装
//!
//! Room ごとに 1 つの Timer を保持します。書き込みは `version` による
//! compare-and-swap で、古い version からの保存は `VersionConflict` になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, RoomId, Timer, TimerRepository};

/// インメモリ Timer Repository 実装
#[derive(Default)]
pub struct InMemoryTimerRepository {
    timers: Mutex<HashMap<RoomId, Timer>>,
}

impl InMemoryTimerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimerRepository for InMemoryTimerRepository {
    async fn find(&self, room_id: &RoomId) -> Result<Option<Timer>, RepositoryError> {
        Ok(self.timers.lock().await.get(room_id).cloned())
    }

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError> {
        Ok(self.timers.lock().await.contains_key(room_id))
    }

    async fn create_if_absent(&self, timer: Timer) -> Result<Timer, RepositoryError> {
        let mut timers = self.timers.lock().await;
        let stored = timers
            .entry(timer.room_id.clone())
            .or_insert_with(|| Timer {
                version: 1,
                ..timer
            });
        Ok(stored.clone())
    }

    async fn save(
        &self,
        mut timer: Timer,
        expected_version: u64,
    ) -> Result<Timer, RepositoryError> {
        let mut timers = self.timers.lock().await;
        let current = timers.get(&timer.room_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("timer of room '{}'", timer.room_id))
        })?;

        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                room_id: timer.room_id.into_string(),
                expected: expected_version,
                found: current.version,
            });
        }

        timer.version = expected_version + 1;
        timers.insert(timer.room_id.clone(), timer.clone());
        Ok(timer)
    }

    async fn find_running(&self) -> Result<Vec<Timer>, RepositoryError> {
        let timers = self.timers.lock().await;
        let mut running: Vec<Timer> = timers
            .values()
            .filter(|t| t.is_running())
            .cloned()
            .collect();
        running.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        Ok(running)
    }
}

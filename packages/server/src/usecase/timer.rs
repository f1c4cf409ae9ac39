//! UseCase: タイマー操作（set / start / pause / resume / reset）
//!
//! 書き込みは `version` による compare-and-swap です。競合したら最新の
//! タイマーを読み直してコマンドを適用し直します（最大 [`MAX_CAS_ATTEMPTS`] 回）。
//! 同じ tick 内に 2 人が pause しても、2 回目は停止済みのタイマーに対する
//! no-op になるため、残り時間が二重に引かれることはありません。

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, RepositoryError, RoomEvent, RoomId, RoomRegistry, Timer,
    TimerCommand, TimerRepository, Timestamp,
};

use super::{RoomNotifier, error::TimerCommandError};

pub const MAX_CAS_ATTEMPTS: usize = 3;

/// タイマー操作のユースケース
pub struct TimerCommandUseCase {
    registry: Arc<dyn RoomRegistry>,
    timers: Arc<dyn TimerRepository>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl TimerCommandUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        timers: Arc<dyn TimerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notifier: RoomNotifier::new(registry.clone(), message_pusher),
            registry,
            timers,
            clock,
        }
    }

    /// コマンドを適用し、変化があれば保存して Room にブロードキャストする
    ///
    /// # Returns
    ///
    /// * `Ok(Some(timer))` - 保存後のタイマー
    /// * `Ok(None)` - no-op（停止中の pause、動作中の start など）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: String,
        command: TimerCommand,
    ) -> Result<Option<Timer>, TimerCommandError> {
        let room_id = RoomId::new(room_id)?;
        let actor = self.actor_name(&room_id, connection_id).await;

        for attempt in 1..=MAX_CAS_ATTEMPTS {
            let mut timer = self
                .timers
                .find(&room_id)
                .await?
                .ok_or(TimerCommandError::TimerNotFound)?;
            let expected_version = timer.version;
            let now = Timestamp::new(self.clock.now_millis());

            if !timer.apply(command, &actor, now)? {
                tracing::debug!(
                    "Timer {} in room '{}' by '{}' changed nothing",
                    command.name(),
                    room_id,
                    actor
                );
                return Ok(None);
            }

            match self.timers.save(timer, expected_version).await {
                Ok(saved) => {
                    tracing::info!(
                        "Timer {} in room '{}' by '{}' (remaining {}s, version {})",
                        command.name(),
                        room_id,
                        actor,
                        saved.remaining_time,
                        saved.version
                    );
                    self.notifier
                        .to_room(&room_id, &RoomEvent::TimerUpdate(saved.clone()))
                        .await;
                    return Ok(Some(saved));
                }
                Err(RepositoryError::VersionConflict { found, .. }) => {
                    tracing::debug!(
                        "Timer {} in room '{}' lost a race (attempt {}, now version {})",
                        command.name(),
                        room_id,
                        attempt,
                        found
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            "Timer {} in room '{}' gave up after {} conflicting attempts",
            command.name(),
            room_id,
            MAX_CAS_ATTEMPTS
        );
        Err(TimerCommandError::Conflict)
    }

    /// 表示名が分かればそれを、分からなければ接続 ID を操作者として記録する
    async fn actor_name(&self, room_id: &RoomId, connection_id: &ConnectionId) -> String {
        match self.registry.member_name(room_id, connection_id).await {
            Some(username) => username.into_string(),
            None => connection_id.to_string(),
        }
    }
}

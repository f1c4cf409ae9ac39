//! UseCase: タイマーの定期更新（tick）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - TimerTickUseCase::run_once() メソッド
//! - 動作中タイマーの残り時間の計算・ブロードキャストと、0 秒到達時の終了処理
//!
//! ### なぜこのテストが必要か
//! - tick はチェックポイントを書き換えずに表示用の値だけを配信する
//! - 終了は 1 度だけ、`system` によるログ付きで保存されなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：600 秒のカウントダウンを模擬時計で最後まで進める
//! - エッジケース：参加者のいない Room、終了時の書き込み競合

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    MessagePusher, RepositoryError, RoomEvent, RoomRegistry, TickOutcome, TimerRepository,
    Timestamp,
};

use super::RoomNotifier;

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Timers still counting down (broadcast, not persisted)
    pub counting: usize,
    /// Timers that reached zero and were saved as ended
    pub ended: usize,
    /// Timers skipped because a participant wrote them during this tick
    pub conflicts: usize,
}

/// タイマー tick のユースケース
pub struct TimerTickUseCase {
    timers: Arc<dyn TimerRepository>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl TimerTickUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        timers: Arc<dyn TimerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            timers,
            notifier: RoomNotifier::new(registry, message_pusher),
            clock,
        }
    }

    /// 動作中の全タイマーを 1 回更新する
    pub async fn run_once(&self) -> Result<TickReport, RepositoryError> {
        let running = self.timers.find_running().await?;
        let now = Timestamp::new(self.clock.now_millis());
        let mut report = TickReport::default();

        for mut timer in running {
            let expected_version = timer.version;
            match timer.tick(now) {
                TickOutcome::Idle => {}
                TickOutcome::Running { .. } => {
                    report.counting += 1;
                    let snapshot = timer.snapshot_at(now);
                    self.notifier
                        .to_room(&timer.room_id, &RoomEvent::TimerUpdate(snapshot))
                        .await;
                }
                TickOutcome::Ended => {
                    let room_id = timer.room_id.clone();
                    match self.timers.save(timer, expected_version).await {
                        Ok(saved) => {
                            report.ended += 1;
                            tracing::info!("Timer in room '{}' ended", room_id);
                            self.notifier
                                .to_room(&room_id, &RoomEvent::TimerUpdate(saved))
                                .await;
                        }
                        Err(RepositoryError::VersionConflict { .. }) => {
                            report.conflicts += 1;
                            tracing::debug!(
                                "Timer in room '{}' changed during tick; retrying next tick",
                                room_id
                            );
                        }
                        Err(e) => {
                            tracing::error!("Failed to end timer in room '{}': {:?}", room_id, e);
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

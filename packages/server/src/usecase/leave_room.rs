//! UseCase: Room からの退出 / 切断
//!
//! 退出・切断の通知は、Room に他の参加者が残っている場合のみ保存・送信します。
//! 最後の 1 人が抜けた Room は名簿から消えますが、記録は残ります。

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, Departure, MessagePusher, MessageRepository, RoomEvent, RoomId,
    RoomRegistry, Timestamp,
};

use super::RoomNotifier;

/// 退出・切断のユースケース
pub struct LeaveRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    messages: Arc<dyn MessageRepository>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notifier: RoomNotifier::new(registry.clone(), message_pusher),
            registry,
            messages,
            clock,
        }
    }

    /// `leaveRoom`: 1 つの Room から抜ける
    ///
    /// 参加していない Room や不正な roomId は無視します。
    pub async fn leave(&self, connection_id: &ConnectionId, room_id: String) -> Option<Departure> {
        let room_id = RoomId::new(room_id).ok()?;
        let departure = self.registry.leave(&room_id, connection_id).await?;
        tracing::info!(
            "'{}' left room '{}'",
            departure.participant.username,
            departure.room_id
        );
        self.announce(&departure, "has left the room").await;
        Some(departure)
    }

    /// 接続が閉じたとき: 参加していた全ての Room から抜ける
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<Departure> {
        let departures = self.registry.disconnect(connection_id).await;
        for departure in &departures {
            tracing::info!(
                "'{}' disconnected from room '{}'",
                departure.participant.username,
                departure.room_id
            );
            self.announce(departure, "has disconnected").await;
        }
        departures
    }

    async fn announce(&self, departure: &Departure, verb: &str) {
        if departure.room_now_empty {
            return;
        }
        let notice = ChatMessage::system(
            departure.room_id.clone(),
            format!("{} {}", departure.participant.username, verb),
            Timestamp::new(self.clock.now_millis()),
        );
        if let Err(e) = self.messages.save(notice.clone()).await {
            tracing::error!(
                "Failed to save departure notice for room '{}': {:?}",
                departure.room_id,
                e
            );
            return;
        }
        self.notifier
            .to_room(&departure.room_id, &RoomEvent::Message(notice))
            .await;
    }
}

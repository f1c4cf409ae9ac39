//! UseCase: チャットメッセージの送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの保存と Room 全体（送信者を含む）へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：空のメッセージ、ストア障害
//! - エッジケース：別の Room の参加者には届かない

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageContent, MessagePusher, MessageRepository, RoomEvent, RoomId,
    RoomRegistry, Timestamp, Username,
};

use super::{RoomNotifier, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messages,
            notifier: RoomNotifier::new(registry, message_pusher),
            clock,
        }
    }

    /// メッセージを保存してから Room にブロードキャストする
    pub async fn execute(
        &self,
        room_id: String,
        username: String,
        message: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let message = ChatMessage::new(
            RoomId::new(room_id)?,
            Username::new(username)?,
            MessageContent::new(message)?,
            Timestamp::new(self.clock.now_millis()),
        );

        self.messages.save(message.clone()).await?;
        let delivered = self
            .notifier
            .to_room(&message.room_id, &RoomEvent::Message(message.clone()))
            .await;
        tracing::debug!(
            "Message from '{}' in room '{}' delivered to {} connection(s)",
            message.username,
            message.room_id,
            delivered
        );

        Ok(message)
    }
}

//! UseCase: WebSocket 接続の登録・解除
//!
//! 接続 ID はサーバーが発行します。クライアントが ID を名乗ることはありません。

use std::sync::Arc;

use crate::domain::{ConnectionId, ErrorScope, MessagePusher, PusherChannel, RoomEvent};

/// 接続管理のユースケース
pub struct ConnectionUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しい接続 ID を発行して送信チャネルを登録する
    pub async fn open(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        connection_id
    }

    pub async fn close(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
    }

    /// 失敗した要求に対する `*:error` イベントを送信元だけに返す
    pub async fn report_error(
        &self,
        connection_id: &ConnectionId,
        scope: ErrorScope,
        message: impl Into<String>,
    ) {
        let event = RoomEvent::error(scope, message);
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!("Failed to report error to '{}': {}", connection_id, e);
        }
    }
}

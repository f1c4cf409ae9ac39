//! UseCase: ユーザー名の事前チェック
//!
//! 入室フォームのための参考情報です。最終的な一意性は join 時に
//! Registry がアトミックに判定するため、ここで valid でも join が拒否されることがあります。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRegistry, Username};

use super::RoomNotifier;

pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken in this room";

/// ユーザー名チェックのユースケース
pub struct CheckUsernameUseCase {
    registry: Arc<dyn RoomRegistry>,
    notifier: RoomNotifier,
}

impl CheckUsernameUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            notifier: RoomNotifier::new(registry.clone(), message_pusher),
            registry,
        }
    }

    /// 判定結果を `username:response` として問い合わせ元に返す
    ///
    /// 戻り値は `valid` と同じ値です。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: String,
        username: String,
    ) -> bool {
        let (valid, message) = match (RoomId::new(room_id), Username::new(username)) {
            (Ok(room_id), Ok(username)) => {
                if self.registry.check_username(&room_id, &username).await {
                    (true, String::new())
                } else {
                    (false, USERNAME_TAKEN_MESSAGE.to_string())
                }
            }
            (Err(e), _) | (_, Err(e)) => (false, e.to_string()),
        };

        let event = RoomEvent::UsernameResponse { valid, message };
        self.notifier.to_connection(connection_id, &event).await;
        valid
    }
}

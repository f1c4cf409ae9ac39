//! UseCase: Room の参照（HTTP API 用）

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomId, RoomRegistry};

use super::RoomStores;

pub struct RoomQueryUseCase {
    registry: Arc<dyn RoomRegistry>,
    stores: RoomStores,
}

impl RoomQueryUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, stores: RoomStores) -> Self {
        Self { registry, stores }
    }

    /// 参加者のいる Room の一覧（RoomId 順）
    pub async fn list_rooms(&self) -> Vec<Room> {
        self.registry.rooms().await
    }

    /// 名簿にあるか、何らかの記録が残っていれば存在するとみなす
    ///
    /// roomId として不正な文字列は「存在しない」として扱います。
    pub async fn room_exists(&self, room_id: String) -> Result<bool, RepositoryError> {
        let Ok(room_id) = RoomId::new(room_id) else {
            return Ok(false);
        };
        if self.registry.has_room(&room_id).await {
            return Ok(true);
        }
        self.stores.has_data(&room_id).await
    }
}

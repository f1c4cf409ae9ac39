//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! `HashMap<RoomId, Room>` を 1 つの Mutex で保護し、各操作をアトミックにします。
//!
//! 参加者が 0 人になった Room はマップから削除されます
//! （タイマー・メッセージ・ノート・ファイルは各 Repository 側に残る）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, JoinOutcome, Participant, Room, RoomError, RoomId, RoomRegistry,
    Username,
};

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    /// RoomId → 参加者名簿
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn depart(
    rooms: &mut HashMap<RoomId, Room>,
    room_id: &RoomId,
    connection_id: &ConnectionId,
) -> Option<Departure> {
    let room = rooms.get_mut(room_id)?;
    let participant = room.leave(connection_id)?;
    let room_now_empty = room.is_empty();
    if room_now_empty {
        rooms.remove(room_id);
        tracing::debug!(
            "Room '{}' is empty and was discarded from the registry",
            room_id
        );
    }
    Some(Departure {
        room_id: room_id.clone(),
        participant,
        room_now_empty,
    })
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn check_username(&self, room_id: &RoomId, username: &Username) -> bool {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .is_none_or(|room| !room.is_username_taken(username))
    }

    async fn has_room(&self, room_id: &RoomId) -> bool {
        self.rooms.lock().await.contains_key(room_id)
    }

    async fn join(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<JoinOutcome, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let joined_at = participant.joined_at;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), joined_at));
        let result = room.join(participant);
        if room.is_empty() {
            // A rejected first join must not leave an empty roster behind
            rooms.remove(room_id);
        }
        result
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<Departure> {
        let mut rooms = self.rooms.lock().await;
        depart(&mut rooms, room_id, connection_id)
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<Departure> {
        let mut rooms = self.rooms.lock().await;
        let mut member_of: Vec<RoomId> = rooms
            .values()
            .filter(|room| room.member_name(connection_id).is_some())
            .map(|room| room.id.clone())
            .collect();
        member_of.sort();

        member_of
            .iter()
            .filter_map(|room_id| depart(&mut rooms, room_id, connection_id))
            .collect()
    }

    async fn member_name(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Option<Username> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .and_then(|room| room.member_name(connection_id))
            .cloned()
    }

    async fn connection_ids(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(Room::connection_ids)
            .unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut snapshot: Vec<Room> = rooms.values().cloned().collect();
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
    }
}

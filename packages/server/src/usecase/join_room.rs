//! UseCase: Room への参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加者への初期状態の送信順序と、参加通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - クライアントは `room:joined` → 履歴 → ノート → タイマー → ファイルの順で
//!   画面を組み立てるため、順序が崩れると表示が壊れる
//! - 同じ接続からの再 join で通知が重複しないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room への最初の参加、既存 Room への参加
//! - 異常系：他の接続が使っているユーザー名、ストア障害
//! - エッジケース：同じ接続・同じ名前での再 join、名簿は空だが記録が残っている Room

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, JoinOutcome, MessagePusher, Participant, RepositoryError,
    RoomEvent, RoomId, RoomRegistry, Timer, Timestamp, Username,
};

use super::{RoomNotifier, RoomStores, error::JoinRoomError};

/// What a successful join did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReport {
    pub is_new_room: bool,
    pub outcome: JoinOutcome,
}

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    stores: RoomStores,
    notifier: RoomNotifier,
    clock: Arc<dyn Clock>,
    /// 参加時に送るチャット履歴の件数
    history_limit: usize,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        stores: RoomStores,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        history_limit: usize,
    ) -> Self {
        Self {
            notifier: RoomNotifier::new(registry.clone(), message_pusher),
            registry,
            stores,
            clock,
            history_limit,
        }
    }

    /// Room への参加を実行
    ///
    /// 1. 同じ接続が同じ名前で参加済みなら何もしない
    /// 2. `isNewRoom` を判定（名簿にも記録にも存在しない Room）
    /// 3. 名前の一意性チェックと名簿への追加をアトミックに行う
    /// 4. 参加者に初期状態を送信（タイマーが無ければ作成）
    /// 5. 参加通知を保存して Room 全体にブロードキャスト
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: String,
        username: String,
    ) -> Result<JoinReport, JoinRoomError> {
        let room_id = RoomId::new(room_id)?;
        let username = Username::new(username)?;

        let current = self.registry.member_name(&room_id, connection_id).await;
        if current.as_ref() == Some(&username) {
            tracing::debug!(
                "Connection '{}' is already in room '{}' as '{}'",
                connection_id,
                room_id,
                username
            );
            return Ok(Self::already_joined());
        }

        let is_new_room =
            !self.registry.has_room(&room_id).await && !self.stores.has_data(&room_id).await?;

        let now = Timestamp::new(self.clock.now_millis());
        let participant = Participant::new(connection_id.clone(), username.clone(), now);
        let outcome = self.registry.join(&room_id, participant).await?;
        if outcome == JoinOutcome::AlreadyJoined {
            return Ok(Self::already_joined());
        }
        tracing::info!(
            "'{}' joined room '{}' (connection '{}', new room: {})",
            username,
            room_id,
            connection_id,
            is_new_room
        );

        self.send_initial_state(connection_id, &room_id, is_new_room, now)
            .await?;

        let notice = ChatMessage::system(
            room_id.clone(),
            format!("{} has joined the room", username),
            now,
        );
        self.stores.messages.save(notice.clone()).await?;
        self.notifier
            .to_room(&room_id, &RoomEvent::Message(notice))
            .await;

        Ok(JoinReport {
            is_new_room,
            outcome,
        })
    }

    fn already_joined() -> JoinReport {
        JoinReport {
            is_new_room: false,
            outcome: JoinOutcome::AlreadyJoined,
        }
    }

    async fn send_initial_state(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        is_new_room: bool,
        now: Timestamp,
    ) -> Result<(), RepositoryError> {
        self.notifier
            .to_connection(connection_id, &RoomEvent::RoomJoined { is_new_room })
            .await;

        let history = self
            .stores
            .messages
            .recent(room_id, self.history_limit)
            .await?;
        self.notifier
            .to_connection(connection_id, &RoomEvent::MessageHistory(history))
            .await;

        let notes = self.stores.notes.list(room_id).await?;
        self.notifier
            .to_connection(connection_id, &RoomEvent::NotesHistory(notes))
            .await;

        let timer = self
            .stores
            .timers
            .create_if_absent(Timer::new(room_id.clone(), connection_id.as_str()))
            .await?;
        self.notifier
            .to_connection(connection_id, &RoomEvent::TimerUpdate(timer.snapshot_at(now)))
            .await;

        let files = self.stores.files.list(room_id).await?;
        self.notifier
            .to_connection(connection_id, &RoomEvent::FilesList(files))
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MessageContent, MessageRepository, Note, NoteRepository, RoomError, TimerRepository,
            repository::MockMessageRepository,
        },
        usecase::test_support::{Fixture, conn, drain, event_types, room_id},
    };

    fn usecase(fixture: &Fixture) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            fixture.registry.clone(),
            fixture.stores(),
            fixture.pusher.clone(),
            fixture.clock(),
            100,
        )
    }

    #[tokio::test]
    async fn test_first_join_sends_initial_state_in_order() {
        // テスト項目: 最初の参加者に初期状態が決められた順序で届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;

        // when (操作):
        let report = usecase(&fixture)
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            report,
            JoinReport {
                is_new_room: true,
                outcome: JoinOutcome::Joined
            }
        );
        let events = drain(&mut rx);
        assert_eq!(
            event_types(&events),
            vec![
                "room:joined",
                "message:history",
                "notes:history",
                "timer:update",
                "files:list",
                "message",
            ]
        );
        assert_eq!(events[0]["data"]["isNewRoom"], true);
        assert_eq!(events[3]["data"]["status"], "paused");
        assert_eq!(events[3]["data"]["remainingTime"], 0);
        assert_eq!(events[5]["data"]["username"], "System");
        assert_eq!(events[5]["data"]["message"], "alice has joined the room");
    }

    #[tokio::test]
    async fn test_second_join_is_announced_to_room() {
        // テスト項目: 2 人目の参加は既存の参加者に通知され、isNewRoom は false になる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_alice = fixture.connect("c1").await;
        let mut rx_bob = fixture.connect("c2").await;
        let usecase = usecase(&fixture);
        usecase
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();
        drain(&mut rx_alice);

        // when (操作):
        let report = usecase
            .execute(&conn("c2"), "abc123".into(), "bob".into())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!report.is_new_room);
        let alice_events = drain(&mut rx_alice);
        assert_eq!(event_types(&alice_events), vec!["message"]);
        assert_eq!(alice_events[0]["data"]["message"], "bob has joined the room");

        let bob_events = drain(&mut rx_bob);
        assert_eq!(bob_events[0]["data"]["isNewRoom"], false);
        let history = bob_events[1]["data"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["message"], "alice has joined the room");
    }

    #[tokio::test]
    async fn test_repeated_join_is_idempotent() {
        // テスト項目: 同じ接続・同じ名前での再 join は名簿にも通知にも影響しない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;
        let usecase = usecase(&fixture);
        usecase
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();
        drain(&mut rx);

        // when (操作):
        let report = usecase
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(report.outcome, JoinOutcome::AlreadyJoined);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(fixture.registry.connection_ids(&room_id("abc123")).await.len(), 1);
        let messages = fixture.messages.recent(&room_id("abc123"), 100).await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_join_with_taken_name_is_rejected() {
        // テスト項目: 他の接続が使っている名前での参加はエラーになり、何も送信されない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c2").await;
        fixture.seat("abc123", "c1", "alice").await;

        // when (操作):
        let result = usecase(&fixture)
            .execute(&conn("c2"), "abc123".into(), "alice".into())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::UsernameTaken(RoomError::UsernameTaken(
                "alice".to_string()
            )))
        );
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_room_with_persisted_notes_is_not_new() {
        // テスト項目: 名簿が空でもノートが残っている Room は isNewRoom = false
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx = fixture.connect("c1").await;
        fixture
            .notes
            .save(Note::new(
                room_id("abc123"),
                Username::new("carol".to_string()).unwrap(),
                MessageContent::new("remember the demo".to_string()).unwrap(),
                Timestamp::new(1),
            ))
            .await
            .unwrap();

        // when (操作):
        let report = usecase(&fixture)
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!report.is_new_room);
        let events = drain(&mut rx);
        assert_eq!(events[2]["type"], "notes:history");
        assert_eq!(events[2]["data"][0]["content"], "remember the demo");
    }

    #[tokio::test]
    async fn test_blank_room_id_is_rejected() {
        // テスト項目: 空の roomId での参加は検証エラーになる
        // given (前提条件):
        let fixture = Fixture::new();

        // when (操作):
        let result = usecase(&fixture)
            .execute(&conn("c1"), "".into(), "alice".into())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(JoinRoomError::InvalidInput(_))));
        assert!(!fixture.registry.has_room(&room_id("abc123")).await);
    }

    #[tokio::test]
    async fn test_first_join_creates_timer_attributed_to_connection() {
        // テスト項目: 最初の参加で作られるタイマーの lastUpdateBy は参加した接続の ID になる
        // given (前提条件):
        let fixture = Fixture::new();
        let _rx = fixture.connect("c1").await;

        // when (操作):
        usecase(&fixture)
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();

        // then (期待する結果):
        let timer = fixture
            .timers
            .find(&room_id("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(timer.last_update_by, "c1");
        assert!(timer.log.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_joins_with_same_name_admit_one() {
        // テスト項目: 別々の接続が同時に同じ名前で参加しても、成功するのは 1 つだけ
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_first = fixture.connect("c1").await;
        let mut rx_second = fixture.connect("c2").await;
        let usecase = Arc::new(usecase(&fixture));

        // when (操作):
        let handles: Vec<_> = ["c1", "c2"]
            .into_iter()
            .map(|id| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    usecase
                        .execute(&conn(id), "abc123".into(), "alice".into())
                        .await
                })
            })
            .collect();
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        // then (期待する結果):
        let joined = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(JoinRoomError::UsernameTaken(RoomError::UsernameTaken(name)))
                        if name == "alice"
                )
            })
            .count();
        assert_eq!(joined, 1);
        assert_eq!(rejected, 1);
        assert_eq!(fixture.registry.connection_ids(&room_id("abc123")).await.len(), 1);

        let notices = fixture.messages.recent(&room_id("abc123"), 100).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].content.as_str(), "alice has joined the room");

        let mut pushed = drain(&mut rx_first);
        pushed.extend(drain(&mut rx_second));
        let announced = pushed
            .iter()
            .filter(|e| {
                e["type"] == "message" && e["data"]["message"] == "alice has joined the room"
            })
            .count();
        assert_eq!(announced, 1);
    }

    #[tokio::test]
    async fn test_rejoin_under_new_name_resends_state_and_announces() {
        // テスト項目: 同じ接続が別名で再参加すると名前が変わり、初期状態の再送と新しい名前での参加通知が行われる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_alice = fixture.connect("c1").await;
        let mut rx_bob = fixture.connect("c2").await;
        let usecase = usecase(&fixture);
        usecase
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await
            .unwrap();
        usecase
            .execute(&conn("c2"), "abc123".into(), "bob".into())
            .await
            .unwrap();
        drain(&mut rx_alice);
        drain(&mut rx_bob);

        // when (操作):
        let report = usecase
            .execute(&conn("c1"), "abc123".into(), "alicia".into())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            report,
            JoinReport {
                is_new_room: false,
                outcome: JoinOutcome::Renamed {
                    previous: Username::new("alice".to_string()).unwrap()
                }
            }
        );
        assert_eq!(
            fixture.registry.member_name(&room_id("abc123"), &conn("c1")).await,
            Some(Username::new("alicia".to_string()).unwrap())
        );
        assert_eq!(fixture.registry.connection_ids(&room_id("abc123")).await.len(), 2);

        let renamed_events = drain(&mut rx_alice);
        assert_eq!(
            event_types(&renamed_events),
            vec![
                "room:joined",
                "message:history",
                "notes:history",
                "timer:update",
                "files:list",
                "message",
            ]
        );
        assert_eq!(renamed_events[0]["data"]["isNewRoom"], false);
        assert_eq!(renamed_events[5]["data"]["message"], "alicia has joined the room");

        let bob_events = drain(&mut rx_bob);
        assert_eq!(event_types(&bob_events), vec!["message"]);
        assert_eq!(bob_events[0]["data"]["message"], "alicia has joined the room");

        // the name is free again for another connection
        let alice = Username::new("alice".to_string()).unwrap();
        assert!(
            fixture
                .registry
                .check_username(&room_id("abc123"), &alice)
                .await
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        // テスト項目: メッセージストアの障害は JoinRoomError::Repository になる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut messages = MockMessageRepository::new();
        messages
            .expect_exists()
            .returning(|_| Err(RepositoryError::Unavailable("down".to_string())));
        let mut stores = fixture.stores();
        stores.messages = Arc::new(messages);
        let usecase = JoinRoomUseCase::new(
            fixture.registry.clone(),
            stores,
            fixture.pusher.clone(),
            fixture.clock(),
            100,
        );

        // when (操作):
        let result = usecase
            .execute(&conn("c1"), "abc123".into(), "alice".into())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::Repository(RepositoryError::Unavailable(
                "down".to_string()
            )))
        );
        assert_eq!(result.unwrap_err().to_string(), "Failed to join room");
    }
}

//! Shared application state.

use std::sync::Arc;

use hackroom_shared::time::Clock;

use crate::{
    domain::{BlobStore, MessagePusher, RoomRegistry},
    usecase::{
        CheckUsernameUseCase, ConnectionUseCase, FileShareUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, NoteUseCase, RoomQueryUseCase, RoomStores, SendMessageUseCase,
        TimerCommandUseCase,
    },
};

/// Use cases reachable from the HTTP and WebSocket handlers
pub struct AppState {
    pub connection: ConnectionUseCase,
    pub check_username: CheckUsernameUseCase,
    pub join_room: JoinRoomUseCase,
    pub leave_room: LeaveRoomUseCase,
    pub send_message: SendMessageUseCase,
    pub timer: TimerCommandUseCase,
    pub note: NoteUseCase,
    pub file: FileShareUseCase,
    pub room_query: RoomQueryUseCase,
}

impl AppState {
    /// Build every use case over the same registry, stores and pusher
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        stores: RoomStores,
        blobs: Arc<dyn BlobStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        history_limit: usize,
    ) -> Self {
        Self {
            connection: ConnectionUseCase::new(message_pusher.clone()),
            check_username: CheckUsernameUseCase::new(registry.clone(), message_pusher.clone()),
            join_room: JoinRoomUseCase::new(
                registry.clone(),
                stores.clone(),
                message_pusher.clone(),
                clock.clone(),
                history_limit,
            ),
            leave_room: LeaveRoomUseCase::new(
                registry.clone(),
                stores.messages.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            send_message: SendMessageUseCase::new(
                registry.clone(),
                stores.messages.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            timer: TimerCommandUseCase::new(
                registry.clone(),
                stores.timers.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            note: NoteUseCase::new(
                registry.clone(),
                stores.notes.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            file: FileShareUseCase::new(
                registry.clone(),
                stores.files.clone(),
                blobs,
                message_pusher,
                clock,
            ),
            room_query: RoomQueryUseCase::new(registry, stores),
        }
    }
}

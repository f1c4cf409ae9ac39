//! Domain layer
//!
//! Value objects, entities and the ports (repository / registry / pusher
//! traits) the use cases depend on. Implementations live in `infrastructure`.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, JoinOutcome, Note, Participant, Room, SharedFile, TickOutcome, Timer,
    TimerAction, TimerCommand, TimerLogEntry, TimerStatus,
};
pub use error::{MessagePushError, RepositoryError, RoomError, TimerError, ValueObjectError};
pub use event::{ErrorScope, RoomEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{
    BlobStore, Departure, FileRepository, MessageRepository, NoteRepository, RoomRegistry,
    TimerRepository,
};
pub use value_object::{
    ConnectionId, FileId, MessageContent, NoteId, RoomId, Timestamp, Username,
};

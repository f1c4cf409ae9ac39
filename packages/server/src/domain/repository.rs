//! Repository / registry trait definitions
//!
//! The data-access interfaces the use cases need, defined by the domain and
//! implemented by the infrastructure layer (dependency inversion).
//!
//! Persisted records (timers, messages, notes, files) go through the
//! `*Repository` traits; the live roster goes through [`RoomRegistry`], which
//! is process-local by nature and therefore infallible.

use async_trait::async_trait;

use super::{
    ChatMessage, ConnectionId, FileId, JoinOutcome, Note, NoteId, Participant, RepositoryError,
    Room, RoomError, RoomId, SharedFile, Timer, Username,
};

/// Timer store
///
/// Writes are compare-and-swap on [`Timer::version`]: `save` fails with
/// [`RepositoryError::VersionConflict`] when the stored version differs from
/// `expected_version`, and bumps the version on success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimerRepository: Send + Sync {
    async fn find(&self, room_id: &RoomId) -> Result<Option<Timer>, RepositoryError>;

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;

    /// Insert `timer` unless the room already has one; returns the stored timer
    async fn create_if_absent(&self, timer: Timer) -> Result<Timer, RepositoryError>;

    async fn save(&self, timer: Timer, expected_version: u64)
    -> Result<Timer, RepositoryError>;

    /// All timers whose status is `Running`
    async fn find_running(&self) -> Result<Vec<Timer>, RepositoryError>;
}

/// Chat history store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: ChatMessage) -> Result<(), RepositoryError>;

    /// The latest `limit` messages of a room, oldest first
    async fn recent(&self, room_id: &RoomId, limit: usize)
    -> Result<Vec<ChatMessage>, RepositoryError>;

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;
}

/// Sticky note store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn save(&self, note: Note) -> Result<(), RepositoryError>;

    /// Delete a note of a room; `Ok(false)` when no such note exists
    async fn delete(&self, room_id: &RoomId, note_id: &NoteId) -> Result<bool, RepositoryError>;

    /// Notes of a room, newest first
    async fn list(&self, room_id: &RoomId) -> Result<Vec<Note>, RepositoryError>;

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;
}

/// Shared file metadata store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn save(&self, file: SharedFile) -> Result<(), RepositoryError>;

    async fn find(&self, file_id: &FileId) -> Result<Option<SharedFile>, RepositoryError>;

    /// Remove and return the record, `Ok(None)` when it did not exist
    async fn delete(&self, file_id: &FileId) -> Result<Option<SharedFile>, RepositoryError>;

    /// Files of a room, newest upload first
    async fn list(&self, room_id: &RoomId) -> Result<Vec<SharedFile>, RepositoryError>;

    async fn exists(&self, room_id: &RoomId) -> Result<bool, RepositoryError>;
}

/// Byte storage for uploaded files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), RepositoryError>;

    /// [`RepositoryError::NotFound`] when the blob is missing
    async fn get(&self, name: &str) -> Result<Vec<u8>, RepositoryError>;

    /// `Ok(false)` when the blob was already gone
    async fn delete(&self, name: &str) -> Result<bool, RepositoryError>;
}

/// A connection removed from a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub participant: Participant,
    /// The room had no one left and its roster entry was discarded
    pub room_now_empty: bool,
}

/// Live roster of every room
///
/// Every method is atomic with respect to the others.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// `true` when nobody in the room currently uses `username`
    async fn check_username(&self, room_id: &RoomId, username: &Username) -> bool;

    async fn has_room(&self, room_id: &RoomId) -> bool;

    /// Add a participant, creating the roster entry on first join
    async fn join(
        &self,
        room_id: &RoomId,
        participant: Participant,
    ) -> Result<JoinOutcome, RoomError>;

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<Departure>;

    /// Remove a connection from every room it is in
    async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<Departure>;

    async fn member_name(&self, room_id: &RoomId, connection_id: &ConnectionId)
    -> Option<Username>;

    async fn connection_ids(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// Snapshot of every non-empty room
    async fn rooms(&self) -> Vec<Room>;
}

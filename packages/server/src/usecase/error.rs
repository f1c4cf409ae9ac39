//! UseCase 層のエラー型
//!
//! `Display` はそのまま `*:error` イベントの `error` に載せてクライアントへ返すため、
//! ストア障害の詳細は含めず、ログ側で `{:?}` として出力します。

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, TimerError, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    UsernameTaken(#[from] RoomError),

    #[error("Failed to join room")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("Failed to save message")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerCommandError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Rejected(#[from] TimerError),

    #[error("Timer not found")]
    TimerNotFound,

    #[error("Timer is being updated by someone else, please retry")]
    Conflict,

    #[error("Failed to update timer")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TimerCommandError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => TimerCommandError::TimerNotFound,
            other => TimerCommandError::Repository(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("Note not found")]
    NoteNotFound,

    #[error("Failed to update notes")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("File not found")]
    FileNotFound,

    #[error("File storage error")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for FileError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(_) => FileError::FileNotFound,
            other => FileError::Repository(other),
        }
    }
}

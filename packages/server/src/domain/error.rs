//! Domain layer error types.

use thiserror::Error;

/// Value Object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} '{value}' is not a valid id")]
    InvalidId { field: &'static str, value: String },
}

/// Timer state machine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timer duration must be between 1 and {max} seconds (got {got})")]
    InvalidDuration { got: u64, max: u64 },

    #[error("Timer has no time remaining; set a duration first")]
    NoTimeRemaining,
}

/// Room membership errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Username '{0}' is already taken in this room")]
    UsernameTaken(String),
}

/// Store access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Timer for room '{room_id}' was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        room_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}

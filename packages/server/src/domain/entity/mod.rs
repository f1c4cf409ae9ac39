//! Entities

pub mod chat;
pub mod file;
pub mod note;
pub mod room;
pub mod timer;

pub use chat::ChatMessage;
pub use file::SharedFile;
pub use note::Note;
pub use room::{JoinOutcome, Participant, Room};
pub use timer::{
    MAX_TIMER_SECONDS, SYSTEM_ACTOR, TickOutcome, Timer, TimerAction, TimerCommand,
    TimerLogEntry, TimerStatus,
};

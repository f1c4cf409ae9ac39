//! Repository 実装
//!
//! - `inmemory`: HashMap をストアとして使う実装

pub mod inmemory;

pub use inmemory::{
    InMemoryFileRepository, InMemoryMessageRepository, InMemoryNoteRepository,
    InMemoryRoomRegistry, InMemoryTimerRepository,
};

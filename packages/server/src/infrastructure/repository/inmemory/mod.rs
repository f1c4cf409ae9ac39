//! インメモリ実装

pub mod file;
pub mod message;
pub mod note;
pub mod room;
pub mod timer;

pub use file::InMemoryFileRepository;
pub use message::InMemoryMessageRepository;
pub use note::InMemoryNoteRepository;
pub use room::InMemoryRoomRegistry;
pub use timer::InMemoryTimerRepository;

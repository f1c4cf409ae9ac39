//! Blob storage for uploaded files
//!
//! - `local`: files under a directory on disk
//! - `memory`: HashMap-backed, for tests and throwaway servers

pub mod local;
pub mod memory;

pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;

//! Utilities shared by the Hackroom server and terminal client.

pub mod logger;
pub mod time;

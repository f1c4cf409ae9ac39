//! Hackroom terminal client.
//!
//! Joins one room over WebSocket and maps typed lines to room events.

pub mod command;
pub mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;

//! Hackroom collaboration server.
//!
//! Rooms share a countdown timer, a chat, sticky notes and files. Clients talk
//! JSON over one WebSocket (`/ws`); uploads and room queries go over HTTP.
//!
//! Layers, outermost first: `ui` (Axum) → `usecase` → `domain` ← `infrastructure`.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

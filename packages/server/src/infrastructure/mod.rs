//! Infrastructure layer
//!
//! Concrete implementations of the domain ports: in-memory stores, blob
//! storage, the WebSocket pusher and the wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod storage;

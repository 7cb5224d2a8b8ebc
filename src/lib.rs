//! Rumorum: ephemeral realtime chat over WebSocket.
//!
//! Every participant in a room owns exactly one mutable message field, and all
//! participants see each other's fields update live. This library provides the
//! synchronization server and the CLI client session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// client session (Session Binder)
pub mod client;

// shared library
pub mod common;

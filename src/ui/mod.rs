//! Realtime chat server implementation (HTTP + WebSocket).

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;

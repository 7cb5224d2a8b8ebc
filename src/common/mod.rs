//! Shared utilities used by both the server and the client binaries.

pub mod fingerprint;
pub mod logger;
pub mod time;

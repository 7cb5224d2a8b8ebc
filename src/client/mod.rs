//! Client session (Session Binder) implementation.

pub mod binder;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;

pub use runner::run_client;

//! Repository 実装
//!
//! - `inmemory`: HashMap をツリーストアとして使う実装
//! - 将来的に: `redis` など

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;

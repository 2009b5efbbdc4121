//! # ck-infra
//!
//! Infrastructure adapters for clipkeep: the durable key-value store, the
//! repositories that serialize the domain aggregates through it, and the
//! system clock.

pub mod fs;
pub mod kv;
pub mod repos;
pub mod time;

pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};
pub use repos::{KvHistoryRepository, KvSettingsRepository};
pub use time::SystemClock;

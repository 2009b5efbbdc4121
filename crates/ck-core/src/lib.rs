//! # ck-core
//!
//! Core domain models and business logic for clipkeep.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod clipboard;
pub mod device;
pub mod ids;
pub mod lifecycle;
pub mod notification;
pub mod ports;
pub mod settings;
pub mod sync;

// Re-export commonly used types at the crate root
pub use auth::AuthSession;
pub use clipboard::{Classification, ClipboardHistory, ClipboardItem, ContentType, SyncStatus};
pub use device::Device;
pub use ids::{DeviceId, ItemId, UserId};
pub use lifecycle::AppLifecycleState;
pub use settings::Settings;
pub use sync::{RemoteRecord, SyncEventRecord, SyncReport};

//! # ck-platform
//!
//! Platform-specific adapters for clipkeep: system clipboard access, the app
//! lifecycle signal, and local device identity.

pub mod clipboard;
pub mod device;
pub mod lifecycle;

pub use clipboard::ArboardClipboard;
pub use device::local_device;
pub use lifecycle::AppLifecycle;

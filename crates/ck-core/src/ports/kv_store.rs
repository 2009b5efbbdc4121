//! Durable key-value store port.
//!
//! The core persists exactly two logical keys: the clipboard aggregate and
//! the settings blob. Values are opaque strings that must round-trip exactly.

use anyhow::Result;
use async_trait::async_trait;

/// Key under which the serialized [`crate::ClipboardHistory`] aggregate lives.
pub const CLIPBOARD_DATA_KEY: &str = "clipboard_data";

/// Key under which the serialized [`crate::Settings`] live.
pub const SETTINGS_KEY: &str = "settings";

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if the key has never
    /// been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Durably store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

//! Clipboard change handler port.
//!
//! The monitor (low-level event source) depends on this abstraction; the
//! application layer implements it by routing candidates into the history
//! store.

use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::ClipboardItem;

/// Callback for newly observed clipboard content.
#[async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called once per detected change with the not-yet-reconciled candidate.
    async fn on_new_item(&self, candidate: ClipboardItem) -> Result<()>;
}

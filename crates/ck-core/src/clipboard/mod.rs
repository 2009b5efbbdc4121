//! Clipboard domain models.

mod classifier;
mod history;
mod item;

pub use classifier::{classify, Classification};
pub use history::{ClipboardHistory, UpsertOutcome, HISTORY_SCHEMA_VERSION};
pub use item::{ClipboardItem, ContentType, SyncStatus};

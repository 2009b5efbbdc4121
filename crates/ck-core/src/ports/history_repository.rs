//! Persistence port for the clipboard-history aggregate.

use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::ClipboardHistory;

#[async_trait]
pub trait HistoryRepositoryPort: Send + Sync {
    /// Load the persisted aggregate. A missing or malformed payload yields
    /// the default aggregate rather than an error.
    async fn load(&self) -> Result<ClipboardHistory>;

    /// Persist the full aggregate as one unit.
    async fn save(&self, history: &ClipboardHistory) -> Result<()>;
}

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

use ck_core::clipboard::ClipboardHistory;
use ck_core::ports::{HistoryRepositoryPort, KeyValueStorePort, CLIPBOARD_DATA_KEY};

/// Persists the clipboard aggregate as one JSON document under the
/// `clipboard_data` key.
pub struct KvHistoryRepository {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HistoryRepositoryPort for KvHistoryRepository {
    async fn load(&self) -> Result<ClipboardHistory> {
        let payload = match self.store.get(CLIPBOARD_DATA_KEY).await? {
            Some(payload) => payload,
            None => return Ok(ClipboardHistory::default()),
        };

        match serde_json::from_str(&payload) {
            Ok(history) => Ok(history),
            Err(err) => {
                // A malformed payload falls back to the default aggregate
                // instead of propagating a parse failure.
                warn!(error = %err, "malformed clipboard history payload, using default");
                Ok(ClipboardHistory::default())
            }
        }
    }

    async fn save(&self, history: &ClipboardHistory) -> Result<()> {
        let payload =
            serde_json::to_string(history).context("serialize clipboard history failed")?;
        self.store.set(CLIPBOARD_DATA_KEY, &payload).await
    }
}

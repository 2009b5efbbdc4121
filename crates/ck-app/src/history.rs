//! Serialized-access owner of the clipboard-history aggregate.
//!
//! All mutations flow through one authoritative in-memory copy guarded by a
//! `tokio::sync::Mutex`: a mutation locks, applies to the latest committed
//! state, persists, and only then releases. Two rapid-fire `add_item` calls
//! can therefore never read pre-mutation state and overwrite each other, and
//! durable-store writes for the aggregate key are never issued concurrently.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use ck_core::clipboard::{classify, ClipboardHistory, ClipboardItem, UpsertOutcome};
use ck_core::ids::{DeviceId, ItemId};
use ck_core::ports::{ClipboardChangeHandler, ClockPort, HistoryRepositoryPort};

pub struct HistoryService {
    repo: Arc<dyn HistoryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    max_items: AtomicUsize,
    device_id: Option<DeviceId>,
    state: tokio::sync::Mutex<ClipboardHistory>,
}

impl HistoryService {
    /// Load the persisted aggregate and take ownership of it. The repository
    /// resolves missing or malformed payloads to the default aggregate, so
    /// this only fails on I/O errors.
    pub async fn load(
        repo: Arc<dyn HistoryRepositoryPort>,
        clock: Arc<dyn ClockPort>,
        max_items: usize,
        device_id: Option<DeviceId>,
    ) -> Result<Self> {
        let history = repo.load().await.context("load clipboard history")?;
        debug!(items = history.items.len(), "clipboard history loaded");
        Ok(Self {
            repo,
            clock,
            max_items: AtomicUsize::new(max_items),
            device_id,
            state: tokio::sync::Mutex::new(history),
        })
    }

    /// Reconcile a candidate against history: refresh-and-front on known
    /// content, insert-at-front otherwise, then truncate to the bound and
    /// persist the whole aggregate.
    pub async fn add_item(&self, candidate: ClipboardItem) -> Result<UpsertOutcome> {
        let now_ms = self.clock.now_ms();
        let max_items = self.max_items.load(Ordering::Relaxed);

        let mut state = self.state.lock().await;
        let outcome = state.upsert(candidate, now_ms, max_items);
        self.persist(&state).await?;
        Ok(outcome)
    }

    /// Manual add: classify raw text and run it through [`Self::add_item`].
    pub async fn add_text(&self, content: &str) -> Result<UpsertOutcome> {
        let candidate = ClipboardItem::candidate(
            content,
            classify(content),
            self.clock.now_ms(),
            self.device_id.clone(),
        );
        self.add_item(candidate).await
    }

    /// Delete by id. Unknown ids are a silent no-op.
    pub async fn delete_item(&self, id: &ItemId) -> Result<()> {
        self.delete_many(std::slice::from_ref(id)).await.map(|_| ())
    }

    /// Delete several ids at once, returning how many were actually removed.
    pub async fn delete_many(&self, ids: &[ItemId]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now_ms = self.clock.now_ms();
        let mut state = self.state.lock().await;
        let removed = state.remove_items(ids, now_ms);
        self.persist(&state).await?;
        Ok(removed)
    }

    /// Flip the favorite flag. Returns the new state, `None` for unknown ids.
    pub async fn toggle_favorite(&self, id: &ItemId) -> Result<Option<bool>> {
        let now_ms = self.clock.now_ms();
        let mut state = self.state.lock().await;
        let toggled = state.toggle_favorite(id, now_ms);
        if toggled.is_some() {
            self.persist(&state).await?;
        }
        Ok(toggled)
    }

    /// Refresh an item's last-seen timestamp (it was just reused).
    pub async fn touch_item(&self, id: &ItemId) -> Result<bool> {
        let now_ms = self.clock.now_ms();
        let mut state = self.state.lock().await;
        let touched = state.touch(id, now_ms);
        if touched {
            self.persist(&state).await?;
        }
        Ok(touched)
    }

    /// Reset to the empty aggregate, preserving the schema version.
    pub async fn clear_all(&self) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let mut state = self.state.lock().await;
        state.clear(now_ms);
        self.persist(&state).await
    }

    /// Replace the item collection with a merged set (post-sync) and persist.
    pub async fn replace_with_merged(&self, items: Vec<ClipboardItem>) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let max_items = self.max_items.load(Ordering::Relaxed);
        let mut state = self.state.lock().await;
        state.replace_items(items, now_ms, max_items);
        self.persist(&state).await
    }

    /// Tag every item as synced (server had no records to merge).
    pub async fn mark_all_synced(&self) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let mut state = self.state.lock().await;
        state.mark_all_synced(now_ms);
        self.persist(&state).await
    }

    /// A point-in-time copy of the aggregate for readers.
    pub async fn snapshot(&self) -> ClipboardHistory {
        self.state.lock().await.clone()
    }

    /// Adjust the history bound at runtime (settings change). Takes effect on
    /// the next mutation.
    pub fn set_max_history_items(&self, max_items: usize) {
        self.max_items.store(max_items, Ordering::Relaxed);
    }

    async fn persist(&self, state: &ClipboardHistory) -> Result<()> {
        self.repo
            .save(state)
            .await
            .context("persist clipboard history")
    }
}

/// The monitor hands candidates straight into the store.
#[async_trait]
impl ClipboardChangeHandler for HistoryService {
    async fn on_new_item(&self, candidate: ClipboardItem) -> Result<()> {
        let outcome = self.add_item(candidate).await?;
        match outcome {
            UpsertOutcome::Inserted(id) => debug!(%id, "clipboard item added"),
            UpsertOutcome::Refreshed(id) => debug!(%id, "clipboard item refreshed"),
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use super::{ClipboardItem, SyncStatus};
use crate::ids::ItemId;

/// Schema version tag carried by persisted aggregates, opaque passthrough.
pub const HISTORY_SCHEMA_VERSION: &str = "1.0.0";

/// Outcome of reconciling a candidate item against existing history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The candidate's content was new; a fresh item was inserted at the front.
    Inserted(ItemId),
    /// An item with the same content already existed; its timestamp was
    /// refreshed and it moved to the front. Every other field survived.
    Refreshed(ItemId),
}

impl UpsertOutcome {
    pub fn item_id(&self) -> &ItemId {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Refreshed(id) => id,
        }
    }
}

/// The whole clipboard-history aggregate, treated as one persisted unit.
///
/// Invariants upheld by every mutation:
/// - `items` holds at most the configured bound, position 0 most recently touched
/// - no two items share the same `content`
/// - `favorites` is exactly the set of ids whose item has `is_favorite` set
/// - `char_count` always matches the item content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardHistory {
    pub items: Vec<ClipboardItem>,
    pub favorites: Vec<ItemId>,
    #[serde(rename = "lastUpdated")]
    pub last_updated_ms: i64,
    pub version: String,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            favorites: Vec::new(),
            last_updated_ms: 0,
            version: HISTORY_SCHEMA_VERSION.to_string(),
        }
    }
}

impl ClipboardHistory {
    /// Reconcile a candidate against existing history.
    ///
    /// Content equality is the identity test: re-observing known content
    /// refreshes that item's timestamp (preserving id, favorite flag and sync
    /// status) instead of inserting a duplicate. New content is inserted at
    /// the front with a fresh id. Either way the history is truncated to
    /// `max_items` from the tail, favorite or not.
    pub fn upsert(
        &mut self,
        candidate: ClipboardItem,
        now_ms: i64,
        max_items: usize,
    ) -> UpsertOutcome {
        let outcome = match self
            .items
            .iter()
            .position(|item| item.content == candidate.content)
        {
            Some(index) => {
                let mut existing = self.items.remove(index);
                existing.timestamp_ms = now_ms;
                let id = existing.id.clone();
                self.items.insert(0, existing);
                UpsertOutcome::Refreshed(id)
            }
            None => {
                let mut item = candidate;
                item.id = ItemId::generate(now_ms);
                item.timestamp_ms = now_ms;
                item.char_count = item.content.chars().count();
                let id = item.id.clone();
                self.items.insert(0, item);
                UpsertOutcome::Inserted(id)
            }
        };

        self.truncate(max_items);
        self.last_updated_ms = now_ms;
        outcome
    }

    /// Remove the given ids. Unknown ids are silently ignored.
    pub fn remove_items(&mut self, ids: &[ItemId], now_ms: i64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id));
        self.favorites.retain(|fav| !ids.contains(fav));
        self.last_updated_ms = now_ms;
        before - self.items.len()
    }

    /// Flip the favorite flag of the item with the given id, keeping the
    /// `favorites` set symmetric. Returns the new state, or `None` if the id
    /// is unknown (a no-op, not an error).
    pub fn toggle_favorite(&mut self, id: &ItemId, now_ms: i64) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        item.is_favorite = !item.is_favorite;
        let now_favorite = item.is_favorite;

        if now_favorite {
            if !self.favorites.contains(id) {
                self.favorites.push(id.clone());
            }
        } else {
            self.favorites.retain(|fav| fav != id);
        }

        self.last_updated_ms = now_ms;
        Some(now_favorite)
    }

    /// Reset to the empty aggregate, preserving the schema version.
    pub fn clear(&mut self, now_ms: i64) {
        self.items.clear();
        self.favorites.clear();
        self.last_updated_ms = now_ms;
    }

    /// Replace the item collection wholesale (post-merge), re-sorting by
    /// recency, truncating to the bound and rebuilding `favorites` from the
    /// items' own flags so the aggregate invariants hold.
    pub fn replace_items(&mut self, items: Vec<ClipboardItem>, now_ms: i64, max_items: usize) {
        self.items = items;
        self.sort_by_recency();
        self.truncate(max_items);
        self.favorites = self
            .items
            .iter()
            .filter(|item| item.is_favorite)
            .map(|item| item.id.clone())
            .collect();
        self.last_updated_ms = now_ms;
    }

    /// Tag every item as synced (used when the server holds no records yet).
    pub fn mark_all_synced(&mut self, now_ms: i64) {
        for item in &mut self.items {
            item.sync_status = Some(SyncStatus::Synced);
        }
        self.last_updated_ms = now_ms;
    }

    /// Refresh the last-seen timestamp of the item with the given id and move
    /// it to the front. Returns `false` for unknown ids.
    pub fn touch(&mut self, id: &ItemId, now_ms: i64) -> bool {
        match self.items.iter().position(|item| &item.id == id) {
            Some(index) => {
                let mut item = self.items.remove(index);
                item.timestamp_ms = now_ms;
                self.items.insert(0, item);
                self.last_updated_ms = now_ms;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn find_by_content(&self, content: &str) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.content == content)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Canonical consumer order: newest first by timestamp.
    pub fn sort_by_recency(&mut self) {
        self.items
            .sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
    }

    fn truncate(&mut self, max_items: usize) {
        if self.items.len() > max_items {
            let evicted: Vec<ItemId> = self
                .items
                .drain(max_items..)
                .map(|item| item.id)
                .collect();
            self.favorites.retain(|fav| !evicted.contains(fav));
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::ids::{DeviceId, ItemId};

/// Semantic type of a clipboard item.
///
/// Only `Text`, `Url` and `Code` are produced by the classifier today; the
/// remaining variants are reserved by the data model so persisted payloads
/// from future versions still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Url,
    Code,
    Json,
    Html,
    Markdown,
    Image,
}

/// Per-item tag tracking whether a record is known to match the remote copy.
///
/// An absent tag means "not yet synced" and is treated like `Pending` when
/// selecting the upload set. `Conflict` is reserved: the current merge policy
/// never assigns it, but it must survive serialization and merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    Pending,
    Conflict,
}

/// A single clipboard history entry.
///
/// `content` is the identity key: two items with equal content are the same
/// logical item. `timestamp_ms` is "last seen", not "first created" — it is
/// refreshed whenever the same content is observed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: ItemId,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    pub is_favorite: bool,
    pub char_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_status: Option<SyncStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
}

impl ClipboardItem {
    /// Build a just-observed candidate item that has not yet been reconciled
    /// against existing history.
    pub fn candidate(
        content: impl Into<String>,
        classification: super::Classification,
        now_ms: i64,
        device_id: Option<DeviceId>,
    ) -> Self {
        let content = content.into();
        let char_count = content.chars().count();
        Self {
            id: ItemId::generate(now_ms),
            content,
            content_type: classification.content_type,
            subcategory: classification.subcategory,
            timestamp_ms: now_ms,
            is_favorite: false,
            char_count,
            sync_status: None,
            device_id,
        }
    }

    /// Whether this item still needs to be uploaded to the remote backend.
    pub fn needs_sync(&self) -> bool {
        self.sync_status != Some(SyncStatus::Synced)
    }
}

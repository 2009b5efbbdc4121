//! Wire models exchanged with the remote record service.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipboardItem, ContentType, SyncStatus};
use crate::ids::{DeviceId, ItemId, UserId};

/// A clipboard record as the backend stores it.
///
/// Field names are the remote schema's, not the local one's: snake_case,
/// `is_favorite`/`char_count` instead of the camelCase local flags, and
/// ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// ISO-8601 moment the item was last touched on the originating device.
    pub timestamp: DateTime<Utc>,
    pub is_favorite: bool,
    pub char_count: usize,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteRecord {
    /// Map a local item to its upload representation.
    pub fn from_item(
        item: &ClipboardItem,
        user_id: &UserId,
        device_id: &DeviceId,
        now_ms: i64,
    ) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            content: item.content.clone(),
            content_type: item.content_type,
            subcategory: item.subcategory.clone(),
            timestamp: ms_to_utc(item.timestamp_ms),
            is_favorite: item.is_favorite,
            char_count: item.char_count,
            device_id: Some(device_id.as_str().to_string()),
            user_id: Some(user_id.as_str().to_string()),
            created_at: Some(ms_to_utc(item.timestamp_ms)),
            updated_at: Some(ms_to_utc(now_ms)),
        }
    }

    /// Map a downloaded record back into the local model. Downloaded records
    /// are by definition in sync with the server.
    pub fn into_item(self) -> ClipboardItem {
        let char_count = self.content.chars().count();
        ClipboardItem {
            id: ItemId::from_string(self.id),
            content: self.content,
            content_type: self.content_type,
            subcategory: self.subcategory,
            timestamp_ms: self.timestamp.timestamp_millis(),
            is_favorite: self.is_favorite,
            char_count,
            sync_status: Some(SyncStatus::Synced),
            device_id: self.device_id.map(DeviceId::from_string),
        }
    }
}

fn ms_to_utc(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
}

/// Device registration upserted by the sync engine after each pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRegistration {
    pub device_id: String,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    pub last_sync: DateTime<Utc>,
}

/// One audit entry in the remote sync-history table. Recording it is
/// best-effort; a failure here never fails the sync that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEventRecord {
    pub device_id: String,
    pub items_synced: usize,
    pub items_received: usize,
    pub sync_type: super::SyncType,
    pub platform: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

use serde::{Deserialize, Serialize};

/// Whether a sync pass uploaded everything or only pending changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Normal,
    Force,
}

impl SyncType {
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::Force
        } else {
            Self::Normal
        }
    }
}

/// Outcome of one sync attempt, with the human-readable summary the engine
/// reports through its completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub success: bool,
    pub message: String,
    pub items_synced: usize,
    pub items_received: usize,
}

impl SyncReport {
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            items_synced: 0,
            items_received: 0,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            items_synced: 0,
            items_received: 0,
        }
    }

    pub fn completed(items_synced: usize, items_received: usize) -> Self {
        Self {
            success: true,
            message: format!(
                "Synced {} items. Received {} items.",
                items_synced, items_received
            ),
            items_synced,
            items_received,
        }
    }
}

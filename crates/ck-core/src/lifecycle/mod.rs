//! App lifecycle signal consumed by the clipboard monitor.

use serde::{Deserialize, Serialize};

/// Host application lifecycle state as reported by the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppLifecycleState {
    Active,
    Inactive,
    Background,
}

impl AppLifecycleState {
    /// Whether the app is in the foreground and user-visible.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Default for AppLifecycleState {
    fn default() -> Self {
        Self::Active
    }
}

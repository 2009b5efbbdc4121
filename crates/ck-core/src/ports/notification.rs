//! Injectable notification surface.

use crate::notification::Notice;

/// Publish transient user-facing notices.
///
/// Components receive this as an injected dependency; tests plug in a
/// recording implementation and the UI shell plugs in its toast system.
pub trait NotificationPort: Send + Sync {
    fn publish(&self, notice: Notice);
}

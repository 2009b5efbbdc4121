//! System clipboard access port.

use anyhow::Result;

/// Platform-agnostic handle on the system clipboard.
///
/// Reads are best-effort: permission or access failures surface as `Err` and
/// callers treat the attempt as a no-op rather than crashing their loop.
pub trait ClipboardDevicePort: Send + Sync {
    /// Read the current clipboard text. `Ok(None)` means the clipboard holds
    /// no text content (empty, or a non-text payload).
    fn read_text(&self) -> Result<Option<String>>;

    /// Replace the clipboard content with the given text.
    fn write_text(&self, content: &str) -> Result<()>;
}

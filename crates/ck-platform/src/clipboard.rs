//! System clipboard adapter backed by `arboard`.

use std::sync::Mutex;

use anyhow::{Context, Result};

use ck_core::ports::ClipboardDevicePort;

/// Cross-platform clipboard handle.
///
/// `arboard::Clipboard` is not `Sync`, so access is funneled through a mutex;
/// the port's callers already serialize their checks, making contention rare.
pub struct ArboardClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new().context("open system clipboard")?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }
}

impl ClipboardDevicePort for ArboardClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard mutex poisoned"))?;
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            // An empty or non-text clipboard is not an access failure.
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(err).context("read system clipboard"),
        }
    }

    fn write_text(&self, content: &str) -> Result<()> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard mutex poisoned"))?;
        clipboard
            .set_text(content.to_string())
            .context("write system clipboard")
    }
}

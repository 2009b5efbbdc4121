//! Copy a stored history item back into the system clipboard.
//!
//! Writing to the clipboard makes the monitor observe our own write on its
//! next tick; the content is marked beforehand so that observation is
//! swallowed instead of re-recorded, and the item's last-seen timestamp is
//! refreshed to move it to the front of the history.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use ck_core::ids::ItemId;
use ck_core::ports::ClipboardDevicePort;

use crate::history::HistoryService;
use crate::monitor::ClipboardMonitor;

pub struct CopyFromHistory {
    history: Arc<HistoryService>,
    clipboard: Arc<dyn ClipboardDevicePort>,
    monitor: Arc<ClipboardMonitor>,
}

impl CopyFromHistory {
    pub fn new(
        history: Arc<HistoryService>,
        clipboard: Arc<dyn ClipboardDevicePort>,
        monitor: Arc<ClipboardMonitor>,
    ) -> Self {
        Self {
            history,
            clipboard,
            monitor,
        }
    }

    /// Write the item's content to the system clipboard. Returns `false`
    /// when the id is unknown (a no-op, not an error).
    pub async fn execute(&self, id: &ItemId) -> Result<bool> {
        let snapshot = self.history.snapshot().await;
        let Some(item) = snapshot.get(id) else {
            debug!(%id, "copy requested for unknown history item");
            return Ok(false);
        };
        let content = item.content.clone();

        // Mark before the write, so the marker is in place when the monitor
        // next observes the clipboard.
        self.monitor.mark_self_write(&content).await;
        self.clipboard
            .write_text(&content)
            .context("write clipboard")?;

        self.history.touch_item(id).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    use ck_core::clipboard::{classify, ClipboardHistory, ClipboardItem};
    use ck_core::notification::Notice;
    use ck_core::ports::{
        ClipboardChangeHandler, ClockPort, HistoryRepositoryPort, NotificationPort,
    };

    #[derive(Default)]
    struct FakeClipboard {
        written: StdMutex<Vec<String>>,
    }

    impl ClipboardDevicePort for FakeClipboard {
        fn read_text(&self) -> Result<Option<String>> {
            Ok(self.written.lock().unwrap().last().cloned())
        }

        fn write_text(&self, content: &str) -> Result<()> {
            self.written.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryRepository {
        saved: StdMutex<Option<ClipboardHistory>>,
    }

    #[async_trait]
    impl HistoryRepositoryPort for InMemoryRepository {
        async fn load(&self) -> Result<ClipboardHistory> {
            Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, history: &ClipboardHistory) -> Result<()> {
            *self.saved.lock().unwrap() = Some(history.clone());
            Ok(())
        }
    }

    struct FixedClock;

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            99_000
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        emissions: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardChangeHandler for CountingHandler {
        async fn on_new_item(&self, candidate: ClipboardItem) -> Result<()> {
            self.emissions.lock().unwrap().push(candidate.content);
            Ok(())
        }
    }

    struct SilentNotifier;

    impl NotificationPort for SilentNotifier {
        fn publish(&self, _notice: Notice) {}
    }

    #[tokio::test]
    async fn copied_item_reaches_the_clipboard_without_retriggering_the_monitor() {
        let clipboard = Arc::new(FakeClipboard::default());
        let handler = Arc::new(CountingHandler::default());
        let history = Arc::new(
            HistoryService::load(
                Arc::new(InMemoryRepository::default()),
                Arc::new(FixedClock),
                100,
                None,
            )
            .await
            .unwrap(),
        );
        let monitor = Arc::new(ClipboardMonitor::new(
            clipboard.clone(),
            handler.clone(),
            Arc::new(FixedClock),
            Arc::new(SilentNotifier),
            None,
        ));

        let outcome = history
            .add_item(ClipboardItem::candidate("stored", classify("stored"), 1, None))
            .await
            .unwrap();
        let id = outcome.item_id().clone();

        let copy = CopyFromHistory::new(history.clone(), clipboard.clone(), monitor.clone());
        assert!(copy.execute(&id).await.unwrap());
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["stored"]);

        // The monitor's next observation of our own write is swallowed.
        monitor.check_once().await;
        assert!(handler.emissions.lock().unwrap().is_empty());

        // A genuinely new copy afterwards is still detected.
        clipboard.write_text("external").unwrap();
        monitor.check_once().await;
        assert_eq!(*handler.emissions.lock().unwrap(), vec!["external"]);
    }

    #[tokio::test]
    async fn unknown_id_is_a_noop() {
        let clipboard = Arc::new(FakeClipboard::default());
        let history = Arc::new(
            HistoryService::load(
                Arc::new(InMemoryRepository::default()),
                Arc::new(FixedClock),
                100,
                None,
            )
            .await
            .unwrap(),
        );
        let monitor = Arc::new(ClipboardMonitor::new(
            clipboard.clone(),
            Arc::new(CountingHandler::default()),
            Arc::new(FixedClock),
            Arc::new(SilentNotifier),
            None,
        ));

        let copy = CopyFromHistory::new(history, clipboard.clone(), monitor);
        assert!(!copy.execute(&ItemId::from("missing")).await.unwrap());
        assert!(clipboard.written.lock().unwrap().is_empty());
    }
}

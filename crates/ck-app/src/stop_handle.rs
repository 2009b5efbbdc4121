//! Cancellation handle for background loops.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// Handle returned by loop-starting operations.
///
/// `stop` is idempotent and fully neutralizes the loop: the shutdown signal
/// is observed between ticks, any in-flight tick runs to completion, and the
/// task is joined before `stop` returns — no tick can fire afterwards.
#[derive(Clone)]
pub struct StopHandle {
    inner: Arc<Inner>,
}

struct Inner {
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StopHandle {
    pub(crate) fn new(shutdown: watch::Sender<bool>, task: JoinHandle<()>) -> Self {
        Self {
            inner: Arc::new(Inner {
                shutdown,
                task: Mutex::new(Some(task)),
            }),
        }
    }

    pub async fn stop(&self) {
        let _ = self.inner.shutdown.send(true);
        if let Some(task) = self.inner.task.lock().await.take() {
            let _ = task.await;
        }
    }

    /// Whether the loop has already been asked to stop.
    pub fn is_stopped(&self) -> bool {
        *self.inner.shutdown.borrow()
    }
}

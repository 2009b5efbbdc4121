//! App lifecycle signal publisher.
//!
//! The UI shell drives this from its own foreground/background hooks; the
//! clipboard monitor subscribes and reacts to transitions.

use tokio::sync::watch;
use tracing::debug;

use ck_core::lifecycle::AppLifecycleState;

pub struct AppLifecycle {
    tx: watch::Sender<AppLifecycleState>,
}

impl AppLifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AppLifecycleState::Active);
        Self { tx }
    }

    /// Current state.
    pub fn state(&self) -> AppLifecycleState {
        *self.tx.borrow()
    }

    /// Publish a transition. Repeating the current state is a no-op for
    /// subscribers.
    pub fn set_state(&self, state: AppLifecycleState) {
        self.tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            debug!(?state, "app lifecycle transition");
            *current = state;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AppLifecycleState> {
        self.tx.subscribe()
    }
}

impl Default for AppLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

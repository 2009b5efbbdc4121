//! Clipboard monitor.
//!
//! Polls the system clipboard on a timer, detects meaningful changes by
//! comparing against the last observed content, classifies new content and
//! hands candidate items to the [`ClipboardChangeHandler`]. Resolving a
//! candidate to "same logical item" is the store's job — the monitor always
//! constructs a fresh candidate.
//!
//! ## Change detection
//!
//! The last observed string survives stop/start cycles and lifecycle pauses,
//! so resuming never re-emits unchanged content. Identical consecutive reads
//! are ignored; the initial read at start seeds the state without emitting.
//!
//! ## Failure semantics
//!
//! Clipboard access is best-effort: a failing read makes the tick a no-op and
//! the loop keeps running. One notice is published per failure transition,
//! not per tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use ck_core::clipboard::{classify, ClipboardItem};
use ck_core::ids::DeviceId;
use ck_core::lifecycle::AppLifecycleState;
use ck_core::notification::Notice;
use ck_core::ports::{ClipboardChangeHandler, ClipboardDevicePort, ClockPort, NotificationPort};

use crate::stop_handle::StopHandle;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

pub struct MonitorOptions {
    /// Poll cadence.
    pub interval: Duration,
    /// Keep polling while the app is backgrounded. When false, ticks are
    /// skipped until the app returns to the foreground.
    pub poll_in_background: bool,
    /// App lifecycle transitions to react to; `None` polls unconditionally.
    pub lifecycle: Option<watch::Receiver<AppLifecycleState>>,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            poll_in_background: false,
            lifecycle: None,
        }
    }
}

pub struct ClipboardMonitor {
    core: Arc<MonitorCore>,
    active: Mutex<Option<StopHandle>>,
}

impl ClipboardMonitor {
    pub fn new(
        clipboard: Arc<dyn ClipboardDevicePort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<dyn NotificationPort>,
        device_id: Option<DeviceId>,
    ) -> Self {
        Self {
            core: Arc::new(MonitorCore {
                clipboard,
                handler,
                clock,
                notifier,
                device_id,
                last_observed: Mutex::new(None),
                ignore_next: Mutex::new(None),
                checking: Mutex::new(()),
                access_error: AtomicBool::new(false),
            }),
            active: Mutex::new(None),
        }
    }

    /// Begin polling. Seeds the last-observed state from the current
    /// clipboard value without emitting an item, then checks every
    /// `options.interval`. An already-running loop is fully stopped first, so
    /// there is never more than one active poll loop per monitor.
    pub async fn start(&self, options: MonitorOptions) -> StopHandle {
        if let Some(previous) = self.active.lock().await.take() {
            previous.stop().await;
        }

        match self.core.clipboard.read_text() {
            Ok(initial) => {
                *self.core.last_observed.lock().await =
                    initial.filter(|text| !text.is_empty());
            }
            Err(err) => {
                warn!(error = %err, "could not read initial clipboard content");
            }
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let core = self.core.clone();
        let MonitorOptions {
            interval,
            poll_in_background,
            mut lifecycle,
        } = options;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut paused = false;

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.changed() => break,

                    changed = lifecycle_transition(lifecycle.as_mut()) => {
                        match changed {
                            Some(AppLifecycleState::Active) => {
                                if paused {
                                    debug!("app foregrounded, resuming clipboard polling");
                                }
                                paused = false;
                                // One immediate out-of-cycle check on foregrounding.
                                core.check_once().await;
                            }
                            Some(AppLifecycleState::Inactive | AppLifecycleState::Background) => {
                                if !poll_in_background {
                                    debug!("app backgrounded, pausing clipboard polling");
                                    paused = true;
                                }
                            }
                            // Publisher went away; keep polling unconditionally.
                            None => lifecycle = None,
                        }
                    }

                    _ = ticker.tick() => {
                        if paused {
                            continue;
                        }
                        core.check_once().await;
                    }
                }
            }
        });

        let handle = StopHandle::new(shutdown_tx, task);
        *self.active.lock().await = Some(handle.clone());
        handle
    }

    /// Stop the active poll loop, if any. Idempotent.
    pub async fn stop(&self) {
        if let Some(handle) = self.active.lock().await.take() {
            handle.stop().await;
        }
    }

    /// Run one change check outside the timer cadence.
    pub async fn check_once(&self) {
        self.core.check_once().await;
    }

    /// Mark content about to be written to the clipboard by this app, so the
    /// next observation of it is ignored once instead of being re-recorded.
    /// Must be called before the write.
    pub async fn mark_self_write(&self, content: &str) {
        *self.core.ignore_next.lock().await = Some(content.to_string());
    }

    /// Whether the last read attempt failed (permission/access issue).
    pub fn has_access_error(&self) -> bool {
        self.core.access_error.load(Ordering::SeqCst)
    }
}

async fn lifecycle_transition(
    rx: Option<&mut watch::Receiver<AppLifecycleState>>,
) -> Option<AppLifecycleState> {
    match rx {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(*rx.borrow_and_update()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}

struct MonitorCore {
    clipboard: Arc<dyn ClipboardDevicePort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<dyn NotificationPort>,
    device_id: Option<DeviceId>,
    last_observed: Mutex<Option<String>>,
    ignore_next: Mutex<Option<String>>,
    checking: Mutex<()>,
    access_error: AtomicBool,
}

impl MonitorCore {
    /// Check the clipboard once. Idempotent and side-effect free when the
    /// content has not meaningfully changed.
    async fn check_once(&self) {
        // At most one in-flight check at a time; a tick that overlaps a slow
        // previous check is dropped rather than queued.
        let _guard = match self.checking.try_lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        let content = match self.clipboard.read_text() {
            Ok(content) => {
                if self.access_error.swap(false, Ordering::SeqCst) {
                    info!("clipboard access restored");
                }
                content
            }
            Err(err) => {
                if !self.access_error.swap(true, Ordering::SeqCst) {
                    warn!(error = %err, "clipboard read failed");
                    self.notifier.publish(Notice::warning(
                        "Clipboard access issue: monitoring continues but new copies are not being recorded",
                    ));
                }
                return;
            }
        };

        let Some(content) = content.filter(|text| !text.is_empty()) else {
            return;
        };

        if self.consume_ignore_marker(&content).await {
            *self.last_observed.lock().await = Some(content);
            return;
        }

        {
            let last = self.last_observed.lock().await;
            if last.as_deref() == Some(content.as_str()) {
                return;
            }
        }

        let now_ms = self.clock.now_ms();
        let candidate = ClipboardItem::candidate(
            &content,
            classify(&content),
            now_ms,
            self.device_id.clone(),
        );
        debug!(chars = candidate.char_count, "new clipboard content detected");

        if let Err(err) = self.handler.on_new_item(candidate).await {
            // Leave last_observed untouched so the next tick retries.
            warn!(error = %err, "clipboard change handler failed");
            return;
        }

        *self.last_observed.lock().await = Some(content);
    }

    async fn consume_ignore_marker(&self, content: &str) -> bool {
        let mut guard = self.ignore_next.lock().await;
        if guard.as_deref() == Some(content) {
            *guard = None;
            true
        } else {
            false
        }
    }
}

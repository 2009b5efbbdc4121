//! Sync engine.
//!
//! Reconciles the local history against the remote record collection: uploads
//! pending local changes, downloads the server state, merges (server wins by
//! id), persists the merged aggregate and records a best-effort audit entry.
//! `sync` never panics and never returns an error to the caller — every
//! failure becomes a completion callback with a human-readable message.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, warn, Instrument};

use ck_core::device::Device;
use ck_core::ports::{ClockPort, IdentityPort, RemoteRecordsPort};
use ck_core::sync::{
    merge_remote_wins, DeviceRegistration, RemoteRecord, SyncEventRecord, SyncReport, SyncType,
};

use crate::history::HistoryService;
use crate::stop_handle::StopHandle;

/// Default cadence of the background sync scheduler.
pub const DEFAULT_BACKGROUND_SYNC_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Upload every item, not only those still pending.
    pub force: bool,
}

/// Progress/completion callbacks for one sync attempt.
///
/// All methods have no-op defaults; implement what the shell cares about.
pub trait SyncObserver: Send + Sync {
    fn on_progress(&self, _percent: u8, _message: &str) {}
    fn on_complete(&self, _success: bool, _message: &str) {}
    fn on_error(&self, _error: &anyhow::Error) {}
}

pub struct NoopSyncObserver;

impl SyncObserver for NoopSyncObserver {}

pub struct SyncEngine {
    history: Arc<HistoryService>,
    identity: Arc<dyn IdentityPort>,
    remote: Arc<dyn RemoteRecordsPort>,
    clock: Arc<dyn ClockPort>,
    device: Device,
}

impl SyncEngine {
    pub fn new(
        history: Arc<HistoryService>,
        identity: Arc<dyn IdentityPort>,
        remote: Arc<dyn RemoteRecordsPort>,
        clock: Arc<dyn ClockPort>,
        device: Device,
    ) -> Self {
        Self {
            history,
            identity,
            remote,
            clock,
            device,
        }
    }

    /// Run one sync pass. Returns whether it succeeded; the summary message
    /// goes through `observer.on_complete`.
    pub async fn sync(&self, options: SyncOptions, observer: &dyn SyncObserver) -> bool {
        let span = info_span!("sync_engine.sync", force = options.force);

        async {
            let report = match self.run(options.force, observer).await {
                Ok(report) => report,
                Err(err) => {
                    warn!(error = %err, "sync failed");
                    self.log_audit_entry(options.force, 0, 0, false, Some(format!("{err:#}")))
                        .await;
                    observer.on_error(&err);
                    SyncReport::failed(format!("Sync failed: {err:#}"))
                }
            };

            info!(
                success = report.success,
                items_synced = report.items_synced,
                items_received = report.items_received,
                "sync finished"
            );
            observer.on_complete(report.success, &report.message);
            report.success
        }
        .instrument(span)
        .await
    }

    /// True iff a session exists and at least one local item still needs to
    /// be uploaded.
    pub async fn is_sync_needed(&self) -> bool {
        match self.identity.current_session().await {
            Ok(Some(_)) => {}
            Ok(None) => return false,
            Err(err) => {
                debug!(error = %err, "identity check failed, treating as signed out");
                return false;
            }
        }

        self.history
            .snapshot()
            .await
            .items
            .iter()
            .any(|item| item.needs_sync())
    }

    async fn run(&self, force: bool, observer: &dyn SyncObserver) -> Result<SyncReport> {
        // Absence of a session is an intentional skip, not an error. A failing
        // identity check is treated the same way.
        let session = match self.identity.current_session().await {
            Ok(session) => session,
            Err(err) => {
                debug!(error = %err, "identity check failed, treating as signed out");
                None
            }
        };
        let Some(session) = session else {
            return Ok(SyncReport::skipped("Not signed in. Sync skipped."));
        };

        if !self.remote.is_reachable().await {
            return Ok(SyncReport::failed(
                "No internet connection. Sync aborted.",
            ));
        }

        observer.on_progress(10, "Preparing to sync...");
        let local = self.history.snapshot().await;
        if local.is_empty() {
            return Ok(SyncReport::skipped(
                "No clipboard items to sync. Add some items first!",
            ));
        }

        let to_sync: Vec<_> = local
            .items
            .iter()
            .filter(|item| item.needs_sync() || force)
            .cloned()
            .collect();
        if to_sync.is_empty() {
            return Ok(SyncReport::skipped("All items are already synced."));
        }

        observer.on_progress(30, &format!("Syncing {} items...", to_sync.len()));
        let now_ms = self.clock.now_ms();
        let records: Vec<RemoteRecord> = to_sync
            .iter()
            .map(|item| {
                RemoteRecord::from_item(item, &session.user_id, &self.device.id, now_ms)
            })
            .collect();

        // A failed upload aborts the attempt before any local mutation.
        self.remote
            .upsert_records(&records)
            .await
            .context("upload clipboard items")?;

        observer.on_progress(60, "Downloading latest data...");
        let downloaded = self
            .remote
            .fetch_records(&session.user_id)
            .await
            .context("fetch clipboard items")?;

        if downloaded.is_empty() {
            debug!("no items on server, marking local items synced");
            self.history.mark_all_synced().await?;
            observer.on_progress(100, "Sync completed successfully");
            return Ok(SyncReport {
                success: true,
                message: format!("Synced {} items. No items on server.", to_sync.len()),
                items_synced: to_sync.len(),
                items_received: 0,
            });
        }

        observer.on_progress(80, "Merging data...");
        let received = downloaded.len();
        let remote_items = downloaded.into_iter().map(RemoteRecord::into_item).collect();
        let merged = merge_remote_wins(local.items, remote_items);
        self.history.replace_with_merged(merged).await?;

        // Device registration refresh and the audit entry are best-effort;
        // the merged state is already persisted.
        let registration = DeviceRegistration {
            device_id: self.device.id.as_str().to_string(),
            device_name: Some(self.device.name.clone()),
            platform: Some(self.device.platform.clone()),
            last_sync: ms_to_utc(self.clock.now_ms()),
        };
        if let Err(err) = self.remote.register_device(&registration).await {
            warn!(error = %err, "device registration refresh failed");
        }

        self.log_audit_entry(force, to_sync.len(), received, true, None)
            .await;

        observer.on_progress(100, "Sync completed successfully");
        Ok(SyncReport::completed(to_sync.len(), received))
    }

    async fn log_audit_entry(
        &self,
        force: bool,
        items_synced: usize,
        items_received: usize,
        success: bool,
        error_message: Option<String>,
    ) {
        let event = SyncEventRecord {
            device_id: self.device.id.as_str().to_string(),
            items_synced,
            items_received,
            sync_type: SyncType::from_force(force),
            platform: self.device.platform.clone(),
            success,
            error_message,
        };
        if let Err(err) = self.remote.log_sync_event(&event).await {
            warn!(error = %err, "failed to record sync history entry");
        }
    }
}

fn ms_to_utc(ms: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
}

/// Periodic background sync.
///
/// Each tick runs a quiet (non-forced, alert-free) sync pass; the engine's
/// own reachability and session checks make unsyncable ticks cheap no-ops.
pub struct BackgroundSyncScheduler;

impl BackgroundSyncScheduler {
    pub fn start(engine: Arc<SyncEngine>, interval: Duration) -> StopHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.changed() => break,

                    _ = ticker.tick() => {
                        debug!("background sync tick");
                        engine.sync(SyncOptions::default(), &NoopSyncObserver).await;
                    }
                }
            }
        });

        StopHandle::new(shutdown_tx, task)
    }
}

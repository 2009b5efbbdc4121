//! Assembly of the core services from injected ports.
//!
//! The constructor signature is the dependency manifest: every port must be
//! provided, no defaults. The UI shell builds the adapters, hands them over,
//! and receives the wired services plus running background loops according to
//! the persisted settings.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use ck_core::device::Device;
use ck_core::lifecycle::AppLifecycleState;
use ck_core::ports::{
    ClipboardDevicePort, ClockPort, HistoryRepositoryPort, IdentityPort, NotificationPort,
    RemoteRecordsPort, SettingsRepositoryPort,
};

use crate::copy_from_history::CopyFromHistory;
use crate::history::HistoryService;
use crate::monitor::{ClipboardMonitor, MonitorOptions};
use crate::settings::SettingsService;
use crate::stop_handle::StopHandle;
use crate::sync::{
    BackgroundSyncScheduler, NoopSyncObserver, SyncEngine, SyncOptions,
    DEFAULT_BACKGROUND_SYNC_INTERVAL,
};

pub struct CoreDeps {
    pub clipboard: Arc<dyn ClipboardDevicePort>,
    pub history_repo: Arc<dyn HistoryRepositoryPort>,
    pub settings_repo: Arc<dyn SettingsRepositoryPort>,
    pub identity: Arc<dyn IdentityPort>,
    pub remote: Arc<dyn RemoteRecordsPort>,
    pub clock: Arc<dyn ClockPort>,
    pub notifier: Arc<dyn NotificationPort>,
    pub device: Device,
    pub lifecycle: Option<watch::Receiver<AppLifecycleState>>,
}

pub struct ClipkeepCore {
    pub settings: Arc<SettingsService>,
    pub history: Arc<HistoryService>,
    pub monitor: Arc<ClipboardMonitor>,
    pub sync: Arc<SyncEngine>,
    pub copy_from_history: CopyFromHistory,
    background_sync: Mutex<Option<StopHandle>>,
}

impl ClipkeepCore {
    /// Wire the services and start the loops the settings ask for.
    pub async fn start(deps: CoreDeps) -> Result<Self> {
        let settings_service = Arc::new(SettingsService::new(deps.settings_repo));
        let settings = settings_service.get().await.context("load settings")?;

        let history = Arc::new(
            HistoryService::load(
                deps.history_repo,
                deps.clock.clone(),
                settings.max_history_items,
                Some(deps.device.id.clone()),
            )
            .await?,
        );

        let monitor = Arc::new(ClipboardMonitor::new(
            deps.clipboard.clone(),
            history.clone(),
            deps.clock.clone(),
            deps.notifier,
            Some(deps.device.id.clone()),
        ));

        let sync = Arc::new(SyncEngine::new(
            history.clone(),
            deps.identity,
            deps.remote,
            deps.clock,
            deps.device,
        ));

        if settings.auto_start_monitoring {
            monitor
                .start(MonitorOptions {
                    interval: Duration::from_millis(settings.monitoring_interval_ms),
                    poll_in_background: settings.enable_background_sync,
                    lifecycle: deps.lifecycle,
                })
                .await;
            info!(
                interval_ms = settings.monitoring_interval_ms,
                "clipboard monitoring started"
            );
        }

        let background_sync = if settings.enable_auto_sync && settings.enable_background_sync {
            debug!("background sync scheduler enabled");
            Some(BackgroundSyncScheduler::start(
                sync.clone(),
                DEFAULT_BACKGROUND_SYNC_INTERVAL,
            ))
        } else {
            None
        };

        // One catch-up pass at startup when auto sync is on and something is
        // still pending.
        if settings.enable_auto_sync {
            let sync = sync.clone();
            tokio::spawn(async move {
                if sync.is_sync_needed().await {
                    sync.sync(SyncOptions::default(), &NoopSyncObserver).await;
                }
            });
        }

        let copy_from_history =
            CopyFromHistory::new(history.clone(), deps.clipboard, monitor.clone());

        Ok(Self {
            settings: settings_service,
            history,
            monitor,
            sync,
            copy_from_history,
            background_sync: Mutex::new(background_sync),
        })
    }

    /// Stop the monitor and the background sync loop. Idempotent.
    pub async fn shutdown(&self) {
        self.monitor.stop().await;
        if let Some(handle) = self.background_sync.lock().await.take() {
            handle.stop().await;
        }
    }
}

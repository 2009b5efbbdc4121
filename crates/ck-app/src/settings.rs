//! Settings use cases.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use ck_core::ports::SettingsRepositoryPort;
use ck_core::settings::{Settings, CURRENT_SCHEMA_VERSION};

pub struct SettingsService {
    repo: Arc<dyn SettingsRepositoryPort>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepositoryPort>) -> Self {
        Self { repo }
    }

    /// Load the current settings; missing or malformed payloads resolve to
    /// defaults inside the repository.
    pub async fn get(&self) -> Result<Settings> {
        let span = info_span!("settings.get");
        async { self.repo.load().await }.instrument(span).await
    }

    /// Validate and persist settings.
    pub async fn update(&self, settings: Settings) -> Result<()> {
        let span = info_span!("settings.update");

        async {
            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                anyhow::bail!(
                    "unsupported settings schema version: {} (expected {})",
                    settings.schema_version,
                    CURRENT_SCHEMA_VERSION
                );
            }
            if settings.max_history_items == 0 {
                anyhow::bail!("maxHistoryItems must be at least 1");
            }
            if settings.monitoring_interval_ms == 0 {
                anyhow::bail!("monitoringIntervalMs must be non-zero");
            }

            self.repo.save(&settings).await?;
            info!(
                max_history_items = settings.max_history_items,
                monitoring_interval_ms = settings.monitoring_interval_ms,
                "settings updated"
            );
            Ok(())
        }
        .instrument(span)
        .await
    }
}

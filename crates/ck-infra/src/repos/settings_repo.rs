use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

use ck_core::ports::{KeyValueStorePort, SettingsRepositoryPort, SETTINGS_KEY};
use ck_core::settings::Settings;

/// Persists settings as one JSON document under the `settings` key.
pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvSettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsRepositoryPort for KvSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let payload = match self.store.get(SETTINGS_KEY).await? {
            Some(payload) => payload,
            None => return Ok(Settings::default()),
        };

        match serde_json::from_str(&payload) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(error = %err, "malformed settings payload, using defaults");
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let payload = serde_json::to_string_pretty(settings).context("serialize settings failed")?;
        self.store.set(SETTINGS_KEY, &payload).await
    }
}

use anyhow::Result;
use async_trait::async_trait;

use crate::settings::Settings;

#[async_trait]
pub trait SettingsRepositoryPort: Send + Sync {
    async fn load(&self) -> Result<Settings>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use ck_core::ports::KeyValueStorePort;

/// File-backed key-value store: one file per key inside a base directory.
///
/// Writes go to a temporary sibling file first and are renamed into place, so
/// a crashed write leaves either the previous value or the complete new one.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create store dir failed: {}", self.dir.display()))
    }

    async fn atomic_write(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_dir().await?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp file failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp file to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("read key failed: {}", path.display()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.atomic_write(&self.path_for(key), value).await
    }
}

//! Remote record service port.

use anyhow::Result;
use async_trait::async_trait;

use crate::ids::UserId;
use crate::sync::{DeviceRegistration, RemoteRecord, SyncEventRecord};

/// The remote backend holding the user's clipboard records.
///
/// All operations are network calls and may fail transiently; the sync
/// engine treats upsert/fetch failures as sync failures and registration or
/// audit failures as best-effort.
#[async_trait]
pub trait RemoteRecordsPort: Send + Sync {
    /// Best-effort reachability probe. `false` means "do not even try".
    async fn is_reachable(&self) -> bool;

    /// Upsert records by id.
    async fn upsert_records(&self, records: &[RemoteRecord]) -> Result<()>;

    /// Fetch the user's full record collection, newest first by remote
    /// timestamp.
    async fn fetch_records(&self, user_id: &UserId) -> Result<Vec<RemoteRecord>>;

    /// Delete records by id.
    async fn delete_records(&self, ids: &[String]) -> Result<()>;

    /// Create or refresh this device's registration row.
    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()>;

    /// Append an audit entry to the sync history.
    async fn log_sync_event(&self, event: &SyncEventRecord) -> Result<()>;
}

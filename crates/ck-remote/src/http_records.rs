//! HTTP record service.
//!
//! Endpoints follow the PostgREST conventions the backend exposes: upserts
//! are POSTs with `on_conflict` + `Prefer: resolution=merge-duplicates`,
//! reads are filtered GETs, deletes use `id=in.(...)` filters.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use ck_core::ids::UserId;
use ck_core::ports::RemoteRecordsPort;
use ck_core::sync::{DeviceRegistration, RemoteRecord, SyncEventRecord};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum RemoteApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Backend { status: StatusCode, message: String },
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the record API, e.g. `https://example.supabase.co/rest/v1`.
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// URL probed for reachability; defaults to the base URL.
    pub probe_url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            probe_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct HttpRecordService {
    client: reqwest::Client,
    base_url: String,
    probe_url: String,
}

impl HttpRecordService {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&config.api_key)?);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let probe_url = config.probe_url.unwrap_or_else(|| base_url.clone());

        Ok(Self {
            client,
            base_url,
            probe_url,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    async fn upsert<T: Serialize>(
        &self,
        table: &str,
        conflict_key: &str,
        rows: &T,
    ) -> Result<(), RemoteApiError> {
        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", conflict_key)])
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteApiError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .send()
            .await?;

        let response = into_checked(response).await?;
        Ok(response.json().await?)
    }
}

async fn into_checked(response: Response) -> Result<Response, RemoteApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RemoteApiError::Backend { status, message })
}

async fn check_status(response: Response) -> Result<(), RemoteApiError> {
    into_checked(response).await.map(|_| ())
}

#[async_trait]
impl RemoteRecordsPort for HttpRecordService {
    async fn is_reachable(&self) -> bool {
        // Connectivity probe: any HTTP response counts, including 4xx.
        match self.client.head(&self.probe_url).send().await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "reachability probe failed");
                false
            }
        }
    }

    async fn upsert_records(&self, records: &[RemoteRecord]) -> Result<()> {
        self.upsert("clipboard_items", "id", &records).await?;
        Ok(())
    }

    async fn fetch_records(&self, user_id: &UserId) -> Result<Vec<RemoteRecord>> {
        let filter = format!("eq.{}", user_id.as_str());
        let records = self
            .get_json(
                "clipboard_items",
                &[("user_id", filter.as_str()), ("order", "timestamp.desc")],
            )
            .await?;
        Ok(records)
    }

    async fn delete_records(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let filter = format!("in.({})", ids.join(","));
        let response = self
            .client
            .delete(self.table_url("clipboard_items"))
            .query(&[("id", filter.as_str())])
            .send()
            .await
            .map_err(RemoteApiError::from)?;
        check_status(response).await?;
        Ok(())
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<()> {
        self.upsert("devices", "device_id", registration).await?;
        Ok(())
    }

    async fn log_sync_event(&self, event: &SyncEventRecord) -> Result<()> {
        let response = self
            .client
            .post(self.table_url("sync_history"))
            .json(event)
            .send()
            .await
            .map_err(RemoteApiError::from)?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ck_core::clipboard::ContentType;
    use mockito::Matcher;

    fn service(base_url: &str) -> HttpRecordService {
        HttpRecordService::new(RemoteConfig::new(base_url, "test-key")).unwrap()
    }

    fn record(id: &str) -> RemoteRecord {
        RemoteRecord {
            id: id.to_string(),
            content: "hello".to_string(),
            content_type: ContentType::Text,
            subcategory: None,
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            is_favorite: false,
            char_count: 5,
            device_id: Some("dev-1".to_string()),
            user_id: Some("user-1".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn upsert_posts_records_with_merge_preference() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/clipboard_items")
            .match_query(Matcher::UrlEncoded("on_conflict".into(), "id".into()))
            .match_header("prefer", "resolution=merge-duplicates")
            .match_header("apikey", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!([
                { "id": "1", "content": "hello", "type": "text" }
            ])))
            .with_status(201)
            .create_async()
            .await;

        let service = service(&server.url());
        service.upsert_records(&[record("1")]).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_filters_by_user_and_orders_by_timestamp() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!([
            {
                "id": "1",
                "content": "hello",
                "type": "text",
                "timestamp": "2023-11-14T22:13:20Z",
                "is_favorite": true,
                "char_count": 5,
                "device_id": "dev-1",
                "user_id": "user-1"
            }
        ]);
        let mock = server
            .mock("GET", "/clipboard_items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
                Matcher::UrlEncoded("order".into(), "timestamp.desc".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let service = service(&server.url());
        let records = service
            .fetch_records(&UserId::from("user-1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert!(records[0].is_favorite);
        assert_eq!(records[0].content_type, ContentType::Text);
    }

    #[tokio::test]
    async fn backend_error_surfaces_with_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/clipboard_items")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("storage exploded")
            .create_async()
            .await;

        let service = service(&server.url());
        let err = service.upsert_records(&[record("1")]).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn delete_uses_an_in_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/clipboard_items")
            .match_query(Matcher::UrlEncoded("id".into(), "in.(1,2)".into()))
            .with_status(204)
            .create_async()
            .await;

        let service = service(&server.url());
        service
            .delete_records(&["1".to_string(), "2".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn device_registration_upserts_by_device_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/devices")
            .match_query(Matcher::UrlEncoded("on_conflict".into(), "device_id".into()))
            .with_status(201)
            .create_async()
            .await;

        let service = service(&server.url());
        service
            .register_device(&DeviceRegistration {
                device_id: "dev-1".to_string(),
                device_name: Some("Workstation".to_string()),
                platform: Some("linux".to_string()),
                last_sync: Utc.timestamp_millis_opt(0).unwrap(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reachability_probe_reports_connectivity() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("HEAD", "/")
            .with_status(404)
            .create_async()
            .await;

        let service = service(&server.url());
        assert!(service.is_reachable().await);

        // A port nothing listens on is unreachable.
        let dead = HttpRecordService::new(RemoteConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "k".to_string(),
            probe_url: None,
            timeout: Duration::from_millis(500),
        })
        .unwrap();
        assert!(!dead.is_reachable().await);
    }
}

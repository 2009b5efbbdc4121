//! # ck-remote
//!
//! Remote backend adapter for clipkeep. Talks to a PostgREST-style record
//! service over HTTP with bounded timeouts; implements
//! [`ck_core::ports::RemoteRecordsPort`].

mod http_records;

pub use http_records::{HttpRecordService, RemoteApiError, RemoteConfig};

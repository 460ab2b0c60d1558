//! Persistence of invocation logs
//!
//! A [`LogStore`] receives the finished [`InvocationLog`] of each request.
//! Writes are best effort: the handler logs a failed save and carries on.

pub mod local;
pub mod s3;

use crate::error::Result;
use crate::invocation::InvocationLog;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

pub use local::LocalLogStore;
pub use s3::S3LogStore;

/// Destination for invocation logs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Write `log` and return where it was written
    async fn save(&self, log: &InvocationLog) -> Result<String>;
}

/// Compose a log object key: `{prefix}{YYYYMMDDTHHMMSSZ}_{id}.json`
pub fn object_key(prefix: &str, now: DateTime<Utc>, id: Uuid) -> String {
    format!("{prefix}{}_{id}.json", now.format("%Y%m%dT%H%M%SZ"))
}

/// Compose a fresh key for the current time
///
/// Keys stay unique within the same second through the random id.
pub fn new_object_key(prefix: &str) -> String {
    object_key(prefix, Utc::now(), Uuid::new_v4())
}

/// Store that drops every log
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardLogStore;

#[async_trait]
impl LogStore for DiscardLogStore {
    async fn save(&self, _log: &InvocationLog) -> Result<String> {
        Ok("discarded".to_string())
    }
}

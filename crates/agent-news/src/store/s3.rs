//! Amazon S3 log store

use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::invocation::InvocationLog;
use crate::store::{LogStore, new_object_key};
use agent_utils::env_opt;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

const CONTENT_TYPE: &str = "application/json";

/// Writes invocation logs as JSON objects into an S3 bucket
pub struct S3LogStore {
    client: Client,
    bucket: Option<String>,
    prefix: String,
}

impl S3LogStore {
    /// Create a store from an existing client
    ///
    /// A missing bucket is reported on each save rather than here, so the
    /// service still answers requests when logging is misconfigured.
    pub fn new(client: Client, bucket: Option<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket,
            prefix: prefix.into(),
        }
    }

    /// Create a store using the bucket and prefix from `config`
    pub async fn from_config(config: &NewsConfig) -> Self {
        let sdk_config = load_aws_config().await;
        Self::new(
            Client::new(&sdk_config),
            config.s3_log_bucket.clone(),
            config.s3_log_prefix.clone(),
        )
    }

    /// Target bucket, if configured
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }
}

/// Load AWS configuration from the default chain
///
/// Static keys in `aws_access_key_id` / `aws_secret_access_key` take
/// precedence when both are set.
pub async fn load_aws_config() -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let (Some(key_id), Some(secret)) = (
        env_opt("aws_access_key_id"),
        env_opt("aws_secret_access_key"),
    ) {
        loader = loader.credentials_provider(Credentials::new(
            key_id,
            secret,
            None,
            None,
            "environment",
        ));
    }

    loader.load().await
}

#[async_trait]
impl LogStore for S3LogStore {
    async fn save(&self, log: &InvocationLog) -> Result<String> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| NewsError::ConfigError("S3_LOG_BUCKET is not set".to_string()))?;

        let key = new_object_key(&self.prefix);
        let body = log.to_pretty_json()?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .content_type(CONTENT_TYPE)
            .body(ByteStream::from(body.into_bytes()))
            .send()
            .await
            .map_err(|e| NewsError::StorageError(DisplayErrorContext(e).to_string()))?;

        info!(bucket, key = %key, "Invocation log saved");
        Ok(format!("s3://{bucket}/{key}"))
    }
}

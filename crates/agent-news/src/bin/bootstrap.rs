//! AWS Lambda entry point
//!
//! Expects a function URL or API Gateway proxy event whose body carries
//! `{"companies": [...]}`. Invocation logs go to `S3_LOG_BUCKET`.

use agent_news::{NewsConfig, S3LogStore, build_handler};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    agent_utils::init_json_tracing();

    let config = NewsConfig::from_env()?;
    let store = S3LogStore::from_config(&config).await;
    if store.bucket().is_none() {
        warn!("S3_LOG_BUCKET is not set, invocation logs will not be saved");
    }

    let handler = Arc::new(build_handler(&config, Arc::new(store))?);
    info!("Lambda handler initialized");

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move {
            let (payload, context) = event.into_parts();
            let response = handler
                .handle_event(payload, Some(context.request_id))
                .await?;
            Ok::<_, Error>(response)
        }
    }))
    .await
}

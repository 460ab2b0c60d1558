//! Request handling for news lookups
//!
//! [`NewsHandler`] validates the company list, runs the agent to the end of
//! its step stream, collects every step's content and hands the finished
//! [`InvocationLog`] to a [`LogStore`]. A failed save is logged and otherwise
//! ignored.

use crate::error::{NewsError, Result};
use crate::invocation::{InputMessage, InvocationLog};
use crate::prompts::news_request;
use crate::store::LogStore;
use agent_core::Agent;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Error message for an empty company list
pub const NO_COMPANIES_ERROR: &str = "No companies provided.";

/// HTTP-style response returned to the function runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    /// JSON document encoded as a string
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    /// Build a response with a JSON body
    pub fn json(status_code: u16, body: &Value) -> Self {
        let headers = BTreeMap::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]);

        Self {
            status_code,
            body: body.to_string(),
            headers,
        }
    }

    /// 200 response listing the companies and collected step contents
    pub fn news(companies: &[String], news: &[String]) -> Self {
        Self::json(200, &json!({ "companies": companies, "news": news }))
    }

    /// 400 response with an error message
    pub fn bad_request(message: &str) -> Self {
        Self::json(400, &json!({ "error": message }))
    }

    /// Parse the body back into JSON
    pub fn body_json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct NewsRequest {
    #[serde(default)]
    companies: Option<Vec<String>>,
}

/// Extract the company list from a function URL or API Gateway event
///
/// `body` may be a JSON string, an inline object, or missing. A missing or
/// null `companies` field yields an empty list. Anything unreadable is
/// [`NewsError::InvalidRequest`].
pub fn parse_request(event: &Value) -> Result<Vec<String>> {
    let parsed = match event.get("body") {
        None | Some(Value::Null) => Ok(NewsRequest::default()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(NewsRequest::default()),
        Some(Value::String(text)) => serde_json::from_str(text),
        Some(body) => NewsRequest::deserialize(body),
    };

    let request = parsed.map_err(|e| NewsError::InvalidRequest(e.to_string()))?;
    Ok(request.companies.unwrap_or_default())
}

/// Handles news requests
pub struct NewsHandler {
    agent: Arc<dyn Agent>,
    store: Arc<dyn LogStore>,
}

impl NewsHandler {
    /// Create a handler around an agent and a log store
    pub fn new(agent: Arc<dyn Agent>, store: Arc<dyn LogStore>) -> Self {
        Self { agent, store }
    }

    /// Answer a news request for `companies`
    ///
    /// Returns 400 without touching the agent or the store when the list is
    /// empty. Agent failures are returned as errors after the partial log has
    /// been saved.
    #[instrument(skip(self, companies), fields(agent = self.agent.name(), company_count = companies.len()))]
    pub async fn handle(
        &self,
        companies: Vec<String>,
        request_id: Option<String>,
    ) -> Result<ApiResponse> {
        if companies.is_empty() {
            warn!("Rejecting request without companies");
            return Ok(ApiResponse::bad_request(NO_COMPANIES_ERROR));
        }

        let input_message = InputMessage::user(news_request(&companies));
        let content = input_message.content.clone();
        let mut log = InvocationLog::start(input_message, companies, request_id);

        let collected = self.collect_steps(content, &mut log).await;
        self.persist(&log).await;

        let news = collected?;
        info!(steps = news.len(), "News request completed");
        Ok(ApiResponse::news(&log.companies, &news))
    }

    /// Answer a raw function event
    ///
    /// An unreadable body is answered with 400.
    pub async fn handle_event(
        &self,
        event: Value,
        request_id: Option<String>,
    ) -> Result<ApiResponse> {
        match parse_request(&event) {
            Ok(companies) => self.handle(companies, request_id).await,
            Err(NewsError::InvalidRequest(reason)) => {
                warn!(%reason, "Rejecting malformed request body");
                Ok(ApiResponse::bad_request(&format!(
                    "Invalid request body: {reason}"
                )))
            }
            Err(e) => Err(e),
        }
    }

    async fn collect_steps(&self, input: String, log: &mut InvocationLog) -> Result<Vec<String>> {
        let mut steps = self.agent.stream(input);
        let mut news = Vec::new();

        while let Some(step) = steps.next().await {
            let step = step?;
            debug!(index = step.index, role = ?step.role, "Agent step");
            log.record_step(&step);
            news.push(step.content);
        }

        Ok(news)
    }

    async fn persist(&self, log: &InvocationLog) {
        match self.store.save(log).await {
            Ok(location) => debug!(%location, "Invocation log persisted"),
            Err(e) => error!(error = %e, "Failed to save invocation log"),
        }
    }
}

//! Yahoo Finance news lookup tool

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::NewsSource;
use crate::prompts::NEWS_TOOL_DESCRIPTION;

/// Name the model uses to call the tool
pub const TOOL_NAME: &str = "yahoo_finance_news";

/// Tool that looks up recent news for a ticker symbol
///
/// Lookups never fail from the agent's point of view: provider errors and
/// empty results are turned into short sentences the model can relay.
pub struct YahooFinanceNewsTool {
    source: Arc<dyn NewsSource>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    ticker: TickerArg,
}

/// Ticker as sent by the model, which occasionally emits a bare number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TickerArg {
    Text(String),
    Number(serde_json::Number),
}

impl TickerArg {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl YahooFinanceNewsTool {
    /// Create a tool backed by `source`
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    /// Look up news for `ticker`, always producing text
    pub async fn lookup(&self, ticker: &str) -> String {
        let ticker = ticker.trim().to_uppercase();

        match self.source.fetch_news(&ticker).await {
            Ok(text) if indicates_no_news(&text) => {
                debug!(%ticker, "No usable news in provider result");
                format!("No recent news found for {ticker}.")
            }
            Ok(text) => text,
            Err(e) => {
                warn!(%ticker, error = %e, "News lookup failed");
                format!("Error retrieving news for {ticker}: {e}")
            }
        }
    }
}

/// Whether provider output should be treated as "no news"
///
/// Any occurrence of "error" counts, so an article quoting a "margin of error"
/// is discarded too.
pub fn indicates_no_news(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.trim().is_empty() || lower.contains("error") || lower.contains("no news found")
}

#[async_trait]
impl Tool for YahooFinanceNewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let ticker = match params {
            Value::String(s) => s,
            other => match serde_json::from_value::<NewsParams>(other.clone()) {
                Ok(p) => p.ticker.into_string(),
                Err(e) => {
                    warn!(params = %other, error = %e, "Invalid news tool parameters");
                    return Ok(Value::String(format!(
                        "Error retrieving news for {other}: invalid parameters: {e}"
                    )));
                }
            },
        };

        Ok(Value::String(self.lookup(&ticker).await))
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        NEWS_TOOL_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol, for example AAPL or MSFT")
            }),
            &["ticker"],
        )
    }
}

//! API clients for news providers

pub mod yahoo;

use crate::error::Result;
use async_trait::async_trait;

pub use yahoo::{NewsItem, YahooNewsClient};

/// A provider of recent news text for a ticker symbol
///
/// Implementations return the text the agent will read, or an error when the
/// provider cannot be reached or answers with garbage.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch recent news for `ticker`
    async fn fetch_news(&self, ticker: &str) -> Result<String>;
}

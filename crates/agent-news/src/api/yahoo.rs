//! Yahoo Finance news client

use crate::api::NewsSource;
use crate::config::DEFAULT_YAHOO_API_BASE;
use crate::error::{NewsError, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

// Yahoo rejects requests without a browser-like user agent
const USER_AGENT: &str = "Mozilla/5.0 (compatible; agent-news/0.1)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// News article from the Yahoo Finance search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Article ID
    #[serde(default)]
    pub uuid: String,
    /// Headline
    pub title: String,
    /// Publisher name
    #[serde(default)]
    pub publisher: String,
    /// Article URL
    #[serde(default)]
    pub link: String,
    /// Short article summary, when Yahoo supplies one
    #[serde(default)]
    pub summary: Option<String>,
    /// Publish time (UNIX timestamp)
    #[serde(default)]
    pub provider_publish_time: Option<i64>,
    /// Item type, "STORY" for articles
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Tickers the article is tagged with
    #[serde(default)]
    pub related_tickers: Vec<String>,
}

impl NewsItem {
    /// Whether the item is an article rather than a video or ad
    pub fn is_story(&self) -> bool {
        self.kind
            .as_deref()
            .is_none_or(|kind| kind.eq_ignore_ascii_case("STORY"))
    }

    /// Whether the item concerns `ticker`; untagged items are kept
    pub fn mentions(&self, ticker: &str) -> bool {
        self.related_tickers.is_empty()
            || self
                .related_tickers
                .iter()
                .any(|t| t.eq_ignore_ascii_case(ticker))
    }

    /// Render as headline, summary, source line and link
    pub fn render(&self) -> String {
        let published = self
            .provider_publish_time
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string());

        let source = match (self.publisher.is_empty(), published) {
            (false, Some(date)) => Some(format!("{} | {date}", self.publisher)),
            (false, None) => Some(self.publisher.clone()),
            (true, Some(date)) => Some(date),
            (true, None) => None,
        };

        let summary = self
            .summary
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string);

        let mut lines = vec![self.title.clone()];
        lines.extend(summary);
        lines.extend(source);
        if !self.link.is_empty() {
            lines.push(self.link.clone());
        }
        lines.join("\n")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

/// Text returned when a ticker has no matching stories
pub fn no_news_message(ticker: &str) -> String {
    format!("No news found for company that searched with {ticker} ticker.")
}

/// Yahoo Finance news client
pub struct YahooNewsClient {
    client: Client,
    api_base: String,
    news_count: usize,
}

impl YahooNewsClient {
    /// Create a client against the public Yahoo Finance host
    pub fn new(news_count: usize) -> Result<Self> {
        Self::with_base(DEFAULT_YAHOO_API_BASE, news_count)
    }

    /// Create a client against a custom host
    pub fn with_base(api_base: impl Into<String>, news_count: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            news_count,
        })
    }

    /// Search recent news for a ticker
    ///
    /// Returns every item Yahoo lists, before story/ticker filtering.
    #[instrument(skip(self))]
    pub async fn search_news(&self, ticker: &str) -> Result<Vec<NewsItem>> {
        if ticker.trim().is_empty() {
            return Err(NewsError::InvalidSymbol(
                "ticker must not be empty".to_string(),
            ));
        }

        let url = format!("{}/v1/finance/search", self.api_base.trim_end_matches('/'));
        let news_count = self.news_count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", ticker),
                ("quotesCount", "0"),
                ("newsCount", news_count.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NewsError::ApiError(format!("Yahoo Finance request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError(format!(
                "Yahoo Finance API error {status}: {body}"
            )));
        }

        let parsed = response.json::<SearchResponse>().await.map_err(|e| {
            NewsError::ApiError(format!("Failed to parse Yahoo Finance response: {e}"))
        })?;

        debug!(count = parsed.news.len(), "Yahoo Finance news received");
        Ok(parsed.news)
    }
}

#[async_trait]
impl NewsSource for YahooNewsClient {
    async fn fetch_news(&self, ticker: &str) -> Result<String> {
        let stories: Vec<String> = self
            .search_news(ticker)
            .await?
            .iter()
            .filter(|item| item.is_story() && item.mentions(ticker))
            .map(NewsItem::render)
            .collect();

        if stories.is_empty() {
            return Ok(no_news_message(ticker));
        }

        Ok(stories.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEARCH_BODY: &str = r#"{
        "explains": [],
        "count": 3,
        "quotes": [],
        "news": [
            {
                "uuid": "a1",
                "title": "Apple unveils new chips",
                "publisher": "Reuters",
                "link": "https://example.com/apple-chips",
                "providerPublishTime": 1700000000,
                "type": "STORY",
                "relatedTickers": ["AAPL"]
            },
            {
                "uuid": "a2",
                "title": "Sponsored video",
                "publisher": "Yahoo",
                "link": "https://example.com/video",
                "type": "VIDEO",
                "relatedTickers": ["AAPL"]
            },
            {
                "uuid": "a3",
                "title": "Microsoft earnings beat",
                "publisher": "Bloomberg",
                "link": "https://example.com/msft",
                "type": "STORY",
                "relatedTickers": ["MSFT"]
            }
        ]
    }"#;

    #[test]
    fn test_render() {
        let item = NewsItem {
            uuid: "a1".to_string(),
            title: "Apple unveils new chips".to_string(),
            publisher: "Reuters".to_string(),
            link: "https://example.com/apple-chips".to_string(),
            summary: None,
            provider_publish_time: Some(1_700_000_000),
            kind: Some("STORY".to_string()),
            related_tickers: vec!["AAPL".to_string()],
        };

        assert_eq!(
            item.render(),
            "Apple unveils new chips\nReuters | 2023-11-14 22:13 UTC\nhttps://example.com/apple-chips"
        );
        assert!(item.is_story());
        assert!(item.mentions("aapl"));
        assert!(!item.mentions("MSFT"));
    }

    #[test]
    fn test_render_includes_summary() {
        let item: NewsItem = serde_json::from_str(
            r#"{
                "title": "Microsoft earnings beat",
                "summary": "Cloud revenue grew 30% year over year.",
                "publisher": "Bloomberg",
                "link": "https://example.com/msft",
                "type": "STORY"
            }"#,
        )
        .unwrap();

        assert_eq!(
            item.render(),
            "Microsoft earnings beat\nCloud revenue grew 30% year over year.\nBloomberg\nhttps://example.com/msft"
        );

        let blank = NewsItem {
            summary: Some("   ".to_string()),
            ..item
        };
        assert!(!blank.render().contains("\n\n"));
        assert_eq!(blank.render().lines().count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_news_filters_stories_for_ticker() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/finance/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "AAPL".into()),
                Matcher::UrlEncoded("newsCount".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SEARCH_BODY)
            .create_async()
            .await;

        let client = YahooNewsClient::with_base(server.url(), 5).unwrap();
        let text = client.fetch_news("AAPL").await.unwrap();

        mock.assert_async().await;
        assert!(text.starts_with("Apple unveils new chips\nReuters"));
        assert!(!text.contains("Sponsored video"));
        assert!(!text.contains("Microsoft"));
    }

    #[tokio::test]
    async fn test_fetch_news_without_matches() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/finance/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"quotes": [], "news": []}"#)
            .create_async()
            .await;

        let client = YahooNewsClient::with_base(server.url(), 10).unwrap();
        let text = client.fetch_news("ZZZZ").await.unwrap();
        assert_eq!(
            text,
            "No news found for company that searched with ZZZZ ticker."
        );
    }

    #[tokio::test]
    async fn test_http_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/finance/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("Too Many Requests")
            .create_async()
            .await;

        let client = YahooNewsClient::with_base(server.url(), 10).unwrap();
        match client.fetch_news("AAPL").await {
            Err(NewsError::ApiError(msg)) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("Too Many Requests"));
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_ticker_rejected() {
        let client = YahooNewsClient::new(10).unwrap();
        let result = client.search_news("  ").await;
        assert!(matches!(result, Err(NewsError::InvalidSymbol(_))));
    }
}

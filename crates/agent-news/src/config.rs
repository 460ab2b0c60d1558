//! Configuration for the news service

use crate::error::{NewsError, Result};
use agent_utils::{env_opt, env_or, env_parse};
use serde::{Deserialize, Serialize};

/// Default object key prefix for invocation logs
pub const DEFAULT_LOG_PREFIX: &str = "logs/";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Yahoo Finance API host
pub const DEFAULT_YAHOO_API_BASE: &str = "https://query2.finance.yahoo.com";

/// Configuration for the news service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Bucket receiving invocation logs (`S3_LOG_BUCKET`)
    pub s3_log_bucket: Option<String>,

    /// Key prefix for invocation logs (`S3_LOG_PREFIX`)
    pub s3_log_prefix: String,

    /// Gemini model identifier (`GEMINI_MODEL`)
    pub model: String,

    /// Sampling temperature (`GEMINI_TEMPERATURE`)
    pub temperature: f32,

    /// Output token cap per model call (`GEMINI_MAX_OUTPUT_TOKENS`)
    pub max_output_tokens: usize,

    /// Model calls allowed per request (`AGENT_MAX_ITERATIONS`)
    pub max_iterations: usize,

    /// Articles requested per ticker (`YAHOO_NEWS_COUNT`)
    pub news_count: usize,

    /// Yahoo Finance host (`YAHOO_API_BASE`)
    pub yahoo_api_base: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            s3_log_bucket: None,
            s3_log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
            max_iterations: 25,
            news_count: 10,
            yahoo_api_base: DEFAULT_YAHOO_API_BASE.to_string(),
        }
    }
}

impl NewsConfig {
    /// Create a new configuration builder
    pub fn builder() -> NewsConfigBuilder {
        NewsConfigBuilder::default()
    }

    /// Load configuration from environment variables, using defaults for
    /// anything unset
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            s3_log_bucket: env_opt("S3_LOG_BUCKET"),
            s3_log_prefix: env_or("S3_LOG_PREFIX", DEFAULT_LOG_PREFIX),
            model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            temperature: env_parse("GEMINI_TEMPERATURE")?.unwrap_or(defaults.temperature),
            max_output_tokens: env_parse("GEMINI_MAX_OUTPUT_TOKENS")?
                .unwrap_or(defaults.max_output_tokens),
            max_iterations: env_parse("AGENT_MAX_ITERATIONS")?.unwrap_or(defaults.max_iterations),
            news_count: env_parse("YAHOO_NEWS_COUNT")?.unwrap_or(defaults.news_count),
            yahoo_api_base: env_or("YAHOO_API_BASE", DEFAULT_YAHOO_API_BASE),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(NewsError::ConfigError(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        if self.news_count == 0 {
            return Err(NewsError::ConfigError(
                "news_count must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(NewsError::ConfigError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        Ok(())
    }
}

/// Builder for NewsConfig
#[derive(Debug, Default)]
pub struct NewsConfigBuilder {
    s3_log_bucket: Option<String>,
    s3_log_prefix: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<usize>,
    max_iterations: Option<usize>,
    news_count: Option<usize>,
    yahoo_api_base: Option<String>,
}

impl NewsConfigBuilder {
    /// Set the log bucket
    pub fn s3_log_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.s3_log_bucket = Some(bucket.into());
        self
    }

    /// Set the log key prefix
    pub fn s3_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.s3_log_prefix = Some(prefix.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap
    pub fn max_output_tokens(mut self, tokens: usize) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Set the model-call budget
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the number of articles per ticker
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Set the Yahoo Finance host
    pub fn yahoo_api_base(mut self, base: impl Into<String>) -> Self {
        self.yahoo_api_base = Some(base.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NewsConfig> {
        let defaults = NewsConfig::default();
        let config = NewsConfig {
            s3_log_bucket: self.s3_log_bucket,
            s3_log_prefix: self.s3_log_prefix.unwrap_or(defaults.s3_log_prefix),
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_output_tokens.unwrap_or(defaults.max_output_tokens),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            news_count: self.news_count.unwrap_or(defaults.news_count),
            yahoo_api_base: self.yahoo_api_base.unwrap_or(defaults.yahoo_api_base),
        };

        config.validate()?;
        Ok(config)
    }
}

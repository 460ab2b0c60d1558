//! Error types for the news service

use thiserror::Error;

/// News service errors
#[derive(Debug, Error)]
pub enum NewsError {
    /// News provider returned an error
    #[error("API error: {0}")]
    ApiError(String),

    /// Ticker symbol cannot be looked up
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Request payload could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Writing the invocation log failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Local filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// LLM provider setup or call failed
    #[error("LLM error: {0}")]
    LlmError(#[from] agent_llm::LLMError),

    /// Agent run failed
    #[error(transparent)]
    AgentError(#[from] agent_core::Error),
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

/// Convert NewsError to agent_core::Error
impl From<NewsError> for agent_core::Error {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::AgentError(inner) => inner,
            other => agent_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

impl From<agent_utils::ConfigError> for NewsError {
    fn from(err: agent_utils::ConfigError) -> Self {
        NewsError::ConfigError(err.to_string())
    }
}

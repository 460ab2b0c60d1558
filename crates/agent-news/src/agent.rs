//! Assembly of the news agent

use crate::api::{NewsSource, YahooNewsClient};
use crate::config::NewsConfig;
use crate::error::Result;
use crate::handler::NewsHandler;
use crate::prompts::NEWS_AGENT_SYSTEM_PROMPT;
use crate::store::LogStore;
use crate::tools::YahooFinanceNewsTool;
use agent_llm::LLMProvider;
use agent_llm::providers::{GeminiConfig, GeminiProvider};
use agent_runtime::{AgentExecutor, ExecutorConfig};
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

/// Name reported by the news agent
pub const AGENT_NAME: &str = "news-agent";

/// Build the news agent around a model provider and a news source
pub fn build_news_agent(
    config: &NewsConfig,
    provider: Arc<dyn LLMProvider>,
    source: Arc<dyn NewsSource>,
) -> Result<AgentExecutor> {
    let registry = ToolRegistry::new().with_tool(Arc::new(YahooFinanceNewsTool::new(source)));

    let executor_config = ExecutorConfig {
        max_iterations: config.max_iterations,
        model: config.model.clone(),
        system_prompt: Some(NEWS_AGENT_SYSTEM_PROMPT.to_string()),
        max_tokens: config.max_output_tokens,
        temperature: Some(config.temperature),
    };

    let agent = AgentExecutor::builder()
        .name(AGENT_NAME)
        .provider(provider)
        .tool_registry(Arc::new(registry))
        .config(executor_config)
        .build()?;

    Ok(agent)
}

/// Gemini provider configured from the environment
pub fn gemini_provider() -> Result<Arc<dyn LLMProvider>> {
    let provider = GeminiProvider::with_config(GeminiConfig::from_env()?)?;
    Ok(Arc::new(provider))
}

/// Yahoo Finance news source for `config`
pub fn yahoo_source(config: &NewsConfig) -> Result<Arc<dyn NewsSource>> {
    let client = YahooNewsClient::with_base(config.yahoo_api_base.clone(), config.news_count)?;
    Ok(Arc::new(client))
}

/// Build a handler backed by Gemini and Yahoo Finance
pub fn build_handler(config: &NewsConfig, store: Arc<dyn LogStore>) -> Result<NewsHandler> {
    let agent = build_news_agent(config, gemini_provider()?, yahoo_source(config)?)?;

    info!(
        model = %config.model,
        max_iterations = config.max_iterations,
        "News agent ready"
    );

    Ok(NewsHandler::new(Arc::new(agent), store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Agent;
    use agent_llm::{CompletionRequest, CompletionResponse, LLMError};
    use async_trait::async_trait;

    struct OfflineProvider;

    #[async_trait]
    impl LLMProvider for OfflineProvider {
        async fn complete(&self, _request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
            Err(LLMError::RequestFailed("offline".to_string()))
        }

        fn name(&self) -> &str {
            "offline"
        }
    }

    #[test]
    fn test_agent_uses_config() {
        let config = NewsConfig::builder()
            .model("gemini-2.0-flash")
            .max_iterations(6)
            .build()
            .unwrap();
        let source = yahoo_source(&config).unwrap();

        let agent = build_news_agent(&config, Arc::new(OfflineProvider), source).unwrap();

        assert_eq!(agent.name(), AGENT_NAME);
        assert_eq!(agent.config().model, "gemini-2.0-flash");
        assert_eq!(agent.config().max_iterations, 6);
        assert_eq!(agent.config().max_tokens, 1024);
        assert_eq!(
            agent.config().system_prompt.as_deref(),
            Some(NEWS_AGENT_SYSTEM_PROMPT)
        );
    }
}

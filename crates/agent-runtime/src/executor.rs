//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Emit the user message
//! 2. Call the LLM with conversation history and available tools, emit its reply
//! 3. If tool use was requested, execute the tools, emit their results and loop back
//! 4. Otherwise the reply is the final answer and the stream ends

use agent_core::{Agent, AgentStep, Error, Result, StepRole, StepStream};
use agent_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, Role, StopReason, ToolDefinition,
};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of model calls in one run
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            model: "gemini-1.5-flash".to_string(),
            system_prompt: None,
            max_tokens: 1024,
            temperature: Some(0.7),
        }
    }
}

/// Where the loop is between two emitted steps
enum Phase {
    Start,
    CallModel,
    RunTools(Message),
    Finished,
}

struct LoopState {
    conversation: Vec<Message>,
    phase: Phase,
    iteration: usize,
    emitted: usize,
}

impl LoopState {
    fn step_for_last(&mut self) -> AgentStep {
        let (role, content) = self.conversation.last().map_or_else(
            || (StepRole::User, String::new()),
            |message| (step_role(message), message.content_text()),
        );
        let step = AgentStep::new(self.emitted, role, content);
        self.emitted += 1;
        step
    }
}

fn step_role(message: &Message) -> StepRole {
    match message.role {
        Role::Assistant => StepRole::Assistant,
        Role::User if message.has_tool_results() => StepRole::Tool,
        Role::User | Role::System => StepRole::User,
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
///
/// The AgentExecutor orchestrates the interaction between an LLM provider
/// and a tool registry, implementing the agent loop pattern.
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    name: String,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
            name: "agent-executor".to_string(),
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Stream the agent loop over an existing conversation
    ///
    /// The last message of `conversation` is emitted first, then every
    /// message the loop appends. All tool results of one model turn form a
    /// single step whose content joins them with blank lines, in call order.
    pub fn stream_conversation(&self, conversation: Vec<Message>) -> StepStream<'_> {
        let state = LoopState {
            conversation,
            phase: Phase::Start,
            iteration: 0,
            emitted: 0,
        };

        futures::stream::try_unfold(state, move |mut state| async move {
            match std::mem::replace(&mut state.phase, Phase::Finished) {
                Phase::Start => {
                    state.phase = Phase::CallModel;
                }
                Phase::CallModel => {
                    state.iteration += 1;
                    if state.iteration > self.config.max_iterations {
                        warn!(
                            max_iterations = self.config.max_iterations,
                            "Max iterations reached, stopping"
                        );
                        return Err(Error::IterationLimit(self.config.max_iterations));
                    }

                    let response = self.call_model(&state.conversation, state.iteration).await?;
                    let message = response.message;
                    state.conversation.push(message.clone());

                    state.phase = match response.stop_reason {
                        StopReason::ToolUse if message.has_tool_uses() => Phase::RunTools(message),
                        StopReason::ToolUse => {
                            warn!("No tool calls despite ToolUse stop reason");
                            Phase::Finished
                        }
                        StopReason::MaxTokens => {
                            warn!("Hit max tokens in LLM response");
                            Phase::Finished
                        }
                        StopReason::EndTurn | StopReason::StopSequence => {
                            info!(iteration = state.iteration, "Agent completed naturally");
                            Phase::Finished
                        }
                    };
                }
                Phase::RunTools(message) => {
                    let results = self.execute_tools(&message).await;
                    info!(
                        result_count = results.len(),
                        "Tool execution completed, continuing agent loop"
                    );
                    state.conversation.push(Message::tool_results(results));
                    state.phase = Phase::CallModel;
                }
                Phase::Finished => return Ok(None),
            }

            let step = state.step_for_last();
            debug!(index = step.index, role = ?step.role, "Emitting step");
            Ok::<_, Error>(Some((step, state)))
        })
        .boxed()
    }

    async fn call_model(
        &self,
        conversation: &[Message],
        iteration: usize,
    ) -> Result<agent_llm::CompletionResponse> {
        let tools = self.build_tool_definitions();

        info!(
            iteration = iteration,
            model = %self.config.model,
            tool_count = tools.len(),
            "Sending request to LLM"
        );

        let mut request_builder = CompletionRequest::builder(&self.config.model)
            .messages(conversation.to_vec())
            .system(
                self.config
                    .system_prompt
                    .clone()
                    .unwrap_or_else(|| "You are a helpful assistant.".to_string()),
            )
            .max_tokens(self.config.max_tokens);

        if let Some(temperature) = self.config.temperature {
            request_builder = request_builder.temperature(temperature);
        }

        // Only add tools if we have any
        if !tools.is_empty() {
            request_builder = request_builder.tools(tools);
        }

        let response = self
            .provider
            .complete(request_builder.build())
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

        info!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "LLM response received"
        );

        Ok(response)
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute every tool call in an assistant message, in order
    ///
    /// Failures are returned to the model as error results.
    async fn execute_tools(&self, message: &Message) -> Vec<ContentBlock> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            let Some(tool) = self.tool_registry.get(name) else {
                warn!(tool_name = %name, "Tool not found");
                results.push(ContentBlock::tool_error(
                    id.clone(),
                    format!("Error: tool not found: {name}"),
                ));
                continue;
            };

            let start_time = std::time::Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let result_str = match result {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    info!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    results.push(ContentBlock::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(ContentBlock::tool_error(id.clone(), format!("Error: {e}")));
                }
            }
        }

        results
    }
}

#[async_trait]
impl Agent for AgentExecutor {
    fn stream(&self, input: String) -> StepStream<'_> {
        self.stream_conversation(vec![Message::user(input)])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    name: Option<String>,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
            name: None,
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the agent name reported by [`Agent::name`]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        let mut executor = AgentExecutor::new(provider, self.tool_registry, self.config);
        if let Some(name) = self.name {
            executor.name = name;
        }
        Ok(executor)
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::{CompletionResponse, LLMError, TokenUsage};
    use agent_tools::Tool;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that replays canned responses and records requests
    struct ScriptedProvider {
        responses: Mutex<VecDeque<agent_llm::Result<CompletionResponse>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<agent_llm::Result<CompletionResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(reply("out of script")))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            let ticker = params["ticker"]
                .as_str()
                .ok_or_else(|| Error::InvalidInput("missing ticker".to_string()))?;
            Ok(Value::String(format!("news for {ticker}")))
        }

        fn name(&self) -> &str {
            "news"
        }

        fn description(&self) -> &str {
            "Fetch news"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"ticker": {"type": "string"}}})
        }
    }

    fn reply(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn tool_call(calls: &[(&str, Value)]) -> CompletionResponse {
        let blocks = calls
            .iter()
            .enumerate()
            .map(|(i, (name, input))| ContentBlock::ToolUse {
                id: format!("call_{i}"),
                name: (*name).to_string(),
                input: input.clone(),
            })
            .collect();
        CompletionResponse {
            message: Message::assistant_blocks(blocks),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    fn executor(provider: Arc<ScriptedProvider>, max_iterations: usize) -> AgentExecutor {
        AgentExecutor::builder()
            .provider(provider)
            .tool_registry(Arc::new(ToolRegistry::new().with_tool(Arc::new(UpperTool))))
            .system_prompt("Use tools")
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    async fn collect(stream: StepStream<'_>) -> Vec<Result<AgentStep>> {
        stream.collect().await
    }

    #[test]
    fn test_builder() {
        let builder = AgentExecutorBuilder::new()
            .model("test-model")
            .max_iterations(5)
            .system_prompt("Test prompt");

        assert_eq!(builder.config.model, "test-model");
        assert_eq!(builder.config.max_iterations, 5);
        assert_eq!(builder.config.system_prompt, Some("Test prompt".to_string()));
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentExecutorBuilder::new().build();
        assert!(matches!(result, Err(Error::InitializationFailed(_))));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_tokens, 1024);
    }

    #[tokio::test]
    async fn test_direct_answer_emits_user_then_assistant() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(reply("No tools needed"))]));
        let agent = executor(provider.clone(), 5);

        let steps: Vec<AgentStep> = collect(agent.stream("hello".to_string()))
            .await
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], AgentStep::new(0, StepRole::User, "hello"));
        assert_eq!(steps[1], AgentStep::new(1, StepRole::Assistant, "No tools needed"));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some("Use tools"));
        assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_call(&[
                ("news", json!({"ticker": "AAPL"})),
                ("news", json!({"ticker": "MSFT"})),
            ])),
            Ok(reply("Summary of AAPL and MSFT")),
        ]));
        let agent = executor(provider.clone(), 5);

        let steps: Vec<AgentStep> = collect(agent.stream("news please".to_string()))
            .await
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();

        let roles: Vec<StepRole> = steps.iter().map(|s| s.role).collect();
        assert_eq!(
            roles,
            vec![
                StepRole::User,
                StepRole::Assistant,
                StepRole::Tool,
                StepRole::Assistant
            ]
        );
        assert_eq!(steps[1].content, "");
        assert_eq!(steps[2].content, "news for AAPL\n\nnews for MSFT");
        assert_eq!(steps[3].content, "Summary of AAPL and MSFT");

        // Second request carries the tool results back to the model
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let last = requests[1].messages.last().unwrap();
        assert!(last.has_tool_results());
    }

    #[tokio::test]
    async fn test_tool_failures_become_error_results() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_call(&[
                ("missing_tool", json!({})),
                ("news", json!({"symbol": "AAPL"})),
            ])),
            Ok(reply("Could not fetch news")),
        ]));
        let agent = executor(provider.clone(), 5);

        let output = agent.process("news please".to_string()).await.unwrap();
        assert_eq!(output, "Could not fetch news");

        let requests = provider.requests.lock().unwrap();
        let results = requests[1].messages.last().unwrap();
        let content = results.content_text();
        assert!(content.contains("tool not found: missing_tool"));
        assert!(content.contains("Invalid input: missing ticker"));
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_after_first_step() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(LLMError::AuthenticationFailed)]));
        let agent = executor(provider, 5);

        let items = collect(agent.stream("hello".to_string())).await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(Error::ProcessingFailed(_))));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_call(&[("news", json!({"ticker": "AAPL"}))])),
            Ok(tool_call(&[("news", json!({"ticker": "AAPL"}))])),
            Ok(tool_call(&[("news", json!({"ticker": "AAPL"}))])),
        ]));
        let agent = executor(provider, 2);

        let result = agent.process("loop".to_string()).await;
        assert!(matches!(result, Err(Error::IterationLimit(2))));
    }
}

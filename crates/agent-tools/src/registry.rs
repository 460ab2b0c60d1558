//! Tool registry for managing available tools

use crate::Tool;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry for managing tools
///
/// Tools are kept ordered by name so the definitions sent to the model are
/// stable between requests.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, builder style
    pub fn with_tool(self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.values().cloned().collect()
    }

    /// Names of all registered tools
    pub fn names(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.keys().cloned().collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Result;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct EchoTool(&'static str);

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(params)
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Echo the input"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(EchoTool("zeta")))
            .with_tool(Arc::new(EchoTool("alpha")));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EchoTool("echo")));
        registry.register(Arc::new(EchoTool("echo")));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_through_registry() {
        let registry = ToolRegistry::new().with_tool(Arc::new(EchoTool("echo")));
        let tool = registry.get("echo").unwrap();
        let output = tool.execute(json!({"ticker": "AAPL"})).await.unwrap();
        assert_eq!(output["ticker"], "AAPL");
    }
}

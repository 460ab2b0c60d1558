//! Steps emitted by a running agent

use serde::{Deserialize, Serialize};

/// Who produced the message carried by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepRole {
    /// The request that started the run
    User,
    /// Model output, including tool-call requests
    Assistant,
    /// Results returned by tools
    Tool,
}

/// One element of an agent's streamed output
///
/// Each step carries the content of the most recent message in the
/// conversation at the time it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    /// Position in the stream, starting at 0
    pub index: usize,
    /// Producer of the trailing message
    pub role: StepRole,
    /// Text content of the trailing message
    pub content: String,
}

impl AgentStep {
    /// Create a new step
    pub fn new(index: usize, role: StepRole, content: impl Into<String>) -> Self {
        Self {
            index,
            role,
            content: content.into(),
        }
    }

    /// Whether this step is a model message
    pub fn is_assistant(&self) -> bool {
        self.role == StepRole::Assistant
    }
}

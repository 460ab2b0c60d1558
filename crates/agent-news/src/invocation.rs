//! Record of a single news request

use crate::error::Result;
use agent_core::{AgentStep, StepRole};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The user message handed to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    /// Always "user"
    pub role: String,
    /// Request text
    pub content: String,
}

impl InputMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One logged agent step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedStep {
    pub role: StepRole,
    pub content: String,
}

impl From<&AgentStep> for LoggedStep {
    fn from(step: &AgentStep) -> Self {
        Self {
            role: step.role,
            content: step.content.clone(),
        }
    }
}

/// Trace of one request, written to the log store when the request ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationLog {
    /// Request start time, RFC 3339 UTC
    pub timestamp: String,
    pub input_message: InputMessage,
    pub companies: Vec<String>,
    pub steps: Vec<LoggedStep>,
    /// Content of the last step, `None` until a step arrives
    pub response: Option<String>,
    pub request_id: Option<String>,
}

impl InvocationLog {
    /// Start a log for a request beginning now
    pub fn start(
        input_message: InputMessage,
        companies: Vec<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::start_at(Utc::now(), input_message, companies, request_id)
    }

    /// Start a log for a request beginning at `started`
    pub fn start_at(
        started: DateTime<Utc>,
        input_message: InputMessage,
        companies: Vec<String>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            timestamp: started.to_rfc3339_opts(SecondsFormat::Micros, true),
            input_message,
            companies,
            steps: Vec::new(),
            response: None,
            request_id,
        }
    }

    /// Append a step and make it the current response
    pub fn record_step(&mut self, step: &AgentStep) {
        self.steps.push(LoggedStep::from(step));
        self.response = Some(step.content.clone());
    }

    /// Serialize with two-space indentation
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

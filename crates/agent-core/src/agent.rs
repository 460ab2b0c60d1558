//! Core Agent trait definition

use crate::{AgentStep, Error, Result};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;

/// Stream of steps produced by one agent run
pub type StepStream<'a> = BoxStream<'a, Result<AgentStep>>;

/// Capability implemented by every agent
///
/// Given a request, an agent produces an ordered stream of steps, possibly
/// invoking named external tools along the way. The content of the last
/// step is the terminal answer. Callers depend on this trait only, so the
/// model provider behind an agent can be swapped without touching them.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Start a run and return its steps in order
    ///
    /// The stream ends once the agent has produced its final message. An
    /// `Err` item means the run failed; no further items follow it.
    fn stream(&self, input: String) -> StepStream<'_>;

    /// Run to completion and return the final message content
    async fn process(&self, input: String) -> Result<String> {
        let mut steps = self.stream(input);
        let mut last = None;
        while let Some(step) = steps.next().await {
            last = Some(step?);
        }
        last.map(|step| step.content).ok_or(Error::EmptyOutput)
    }

    /// Get the agent's name
    fn name(&self) -> &str;
}

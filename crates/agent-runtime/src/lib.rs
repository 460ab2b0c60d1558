//! Agent runtime for executing agents
//!
//! This crate provides [`AgentExecutor`], which drives an LLM provider and a
//! tool registry through the model → tool → model loop and exposes each
//! intermediate message as an [`agent_core::AgentStep`].

pub mod executor;

// Re-export key types
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig};

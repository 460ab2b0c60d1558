//! Core abstractions for agent-rs
//!
//! This crate defines the fundamental traits and types used throughout the
//! workspace: the [`Agent`] capability, the [`AgentStep`] values it streams,
//! and the shared error type.

pub mod agent;
pub mod error;
pub mod step;

pub use agent::{Agent, StepStream};
pub use error::{Error, Result};
pub use step::{AgentStep, StepRole};

//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Tool received parameters it cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The agent loop exceeded its model-call budget
    #[error("Agent stopped after {0} iterations without a final answer")]
    IterationLimit(usize),

    /// The agent finished without emitting any step
    #[error("Agent produced no output")]
    EmptyOutput,
}

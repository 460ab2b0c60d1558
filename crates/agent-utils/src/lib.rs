//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_opt, env_or, env_parse};
pub use logging::{init_json_tracing, init_tracing};

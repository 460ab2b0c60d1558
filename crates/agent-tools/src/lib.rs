//! Tool management and execution framework for agent-rs
//!
//! This crate provides a framework for defining the tools (functions) an
//! agent may call, and a registry the agent loop looks them up in.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;

//! Prompt text for the news agent
//!
//! - `system`: the system instruction and tool description
//! - `user`: the per-request user message

mod system;
mod user;

pub use system::*;
pub use user::*;

//! Company news over an LLM agent
//!
//! A handler receives a list of company names, asks a Gemini-backed agent for
//! their latest news (the agent resolves tickers and calls the Yahoo Finance
//! news tool), returns every step the agent produced, and writes a trace of
//! the run to a log store.
//!
//! # Modules
//!
//! - [`handler`]: request validation, agent driving, response shape
//! - [`agent`]: wiring of provider, tool and executor
//! - [`tools`]: the `yahoo_finance_news` tool
//! - [`api`]: news provider clients
//! - [`store`]: invocation log persistence (S3, local files)
//! - [`invocation`]: the logged trace
//! - [`prompts`]: system and user prompts
//! - [`config`]: environment configuration

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod invocation;
pub mod prompts;
pub mod store;
pub mod tools;

pub use agent::{build_handler, build_news_agent};
pub use api::{NewsSource, YahooNewsClient};
pub use config::NewsConfig;
pub use error::{NewsError, Result};
pub use handler::{ApiResponse, NewsHandler, parse_request};
pub use invocation::{InputMessage, InvocationLog, LoggedStep};
pub use store::{DiscardLogStore, LocalLogStore, LogStore, S3LogStore};
pub use tools::YahooFinanceNewsTool;

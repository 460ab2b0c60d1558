//! Tools exposed to the news agent

pub mod yahoo_news;

pub use yahoo_news::YahooFinanceNewsTool;

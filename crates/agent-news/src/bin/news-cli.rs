//! Local runner for the news agent
//!
//! ```bash
//! export GOOGLE_API_KEY=...
//! cargo run --bin news-cli -p agent-news -- Apple Microsoft --log-dir ./logs
//! ```

use agent_news::{
    DiscardLogStore, LocalLogStore, LogStore, NewsConfig, S3LogStore, build_handler,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "news-cli")]
#[command(about = "Ask the news agent for the latest stories about companies", long_about = None)]
struct Args {
    /// Company names (default: Apple Microsoft)
    companies: Vec<String>,

    /// Write invocation logs under this directory instead of S3
    #[arg(long, value_name = "DIR", conflicts_with = "no_log")]
    log_dir: Option<PathBuf>,

    /// Do not persist invocation logs
    #[arg(long)]
    no_log: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    agent_utils::init_tracing();

    let args = Args::parse();
    let config = NewsConfig::from_env()?;

    let store: Arc<dyn LogStore> = if args.no_log {
        Arc::new(DiscardLogStore)
    } else if let Some(dir) = args.log_dir {
        Arc::new(LocalLogStore::new(dir, config.s3_log_prefix.clone()))
    } else {
        Arc::new(S3LogStore::from_config(&config).await)
    };

    let companies = if args.companies.is_empty() {
        vec!["Apple".to_string(), "Microsoft".to_string()]
    } else {
        args.companies
    };

    info!(?companies, model = %config.model, "Running news agent");

    let handler = build_handler(&config, store)?;
    let response = handler.handle(companies, None).await?;
    let body = response.body_json()?;

    if let Some(steps) = body["news"].as_array() {
        for (index, step) in steps.iter().enumerate() {
            println!("================ Step {index} ================");
            println!("{}", step.as_str().unwrap_or_default());
            println!();
        }
    }

    println!("Status: {}", response.status_code);
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}

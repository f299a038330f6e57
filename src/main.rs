use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pachico_core::{AgentClient, AppConfig, ChatController, ConversationsStore};
use parking_lot::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Args, Repl};

/// `--verbose` forces debug; otherwise `RUST_LOG` if it parses, else warn so
/// log lines don't interleave with the chat
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.apply(AppConfig::from_env());
    info!(api_url = %config.api_url, persist = config.persist, "Starting Pachico");

    let client = AgentClient::from_config(&config).context("Failed to create agent client")?;

    // Hydrate before anything can write back to storage
    let mut store = ConversationsStore::new(config.conversation_storage());
    store.hydrate();

    let controller = ChatController::new(Arc::new(Mutex::new(store)), Arc::new(client.clone()));

    Repl::new(controller, client, std::io::stdout()).run().await
}

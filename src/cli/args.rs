use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pachico_core::AppConfig;

/// Terminal chat client for the Pachico nutrition assistant
#[derive(Debug, Parser)]
#[command(name = "pachico", version, about)]
pub struct Args {
    /// Base URL of the agent service (overrides PACHICO_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides PACHICO_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory for stored conversations (overrides PACHICO_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep conversations in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Layer command-line flags on top of `config`
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs.filter(|s| *s > 0) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if self.no_persist {
            config.persist = false;
        }
        config
    }
}

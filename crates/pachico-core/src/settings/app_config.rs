use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::repositories::{
    ConversationStorage, InMemoryRepository, JsonFileRepository, KeyValueRepository,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_URL: &str = "PACHICO_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PACHICO_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "PACHICO_DATA_DIR";

/// Runtime configuration of the chat client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the agent service
    pub api_url: String,
    pub request_timeout: Duration,
    /// Where conversations are stored; `None` means the platform config dir
    pub data_dir: Option<PathBuf>,
    /// When false, conversations live only for this session
    pub persist: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: None,
            persist: true,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `PACHICO_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Build the conversation storage this configuration describes.
    ///
    /// Falls back to session-only storage when no config directory exists.
    pub fn conversation_storage(&self) -> ConversationStorage {
        if !self.persist {
            info!("Persistence disabled, conversations are kept in memory");
            return ConversationStorage::new(Arc::new(InMemoryRepository::new()));
        }

        let backend: Arc<dyn KeyValueRepository> = match &self.data_dir {
            Some(dir) => Arc::new(JsonFileRepository::with_dir(dir)),
            None => match JsonFileRepository::new() {
                Ok(repo) => Arc::new(repo),
                Err(e) => {
                    warn!(error = %e, "No persistence backend available");
                    return ConversationStorage::detached();
                }
            },
        };

        info!(path = %backend.storage_path(), "Using conversation storage");
        ConversationStorage::new(backend)
    }
}

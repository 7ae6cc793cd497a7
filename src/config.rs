//! Configuration types for the Sibyl service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SibylError};
use crate::search::MinerKind;

/// Top-level configuration for the question-answering service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SibylConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Evidence retrieval settings.
    pub retrieval: RetrievalConfig,
    /// Answer ranking settings.
    pub ranking: RankingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind. 0 lets the OS pick a free port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3128,
        }
    }
}

/// Evidence retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Knowledge miners to query. All are queried concurrently and their
    /// results merged.
    pub miners: Vec<MinerKind>,
    /// Maximum merged results handed to the ranking engine.
    pub max_results: usize,
    /// Maximum results taken from each miner per query.
    pub per_miner_results: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// How long mined results stay cached, in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Bing Web Search v7 endpoint. Overridable for tests.
    pub bing_endpoint: String,
    /// Bing subscription key. When `None` the `BING_API_KEY` environment
    /// variable is consulted at startup; the Bing miner fails without one.
    pub bing_api_key: Option<String>,
    /// Custom User-Agent (None = rotate through a built-in browser list).
    pub user_agent: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            miners: vec![MinerKind::DuckDuckGo, MinerKind::Bing],
            max_results: 25,
            per_miner_results: 5,
            timeout_seconds: 8,
            cache_ttl_seconds: 600,
            bing_endpoint: "https://api.cognitive.microsoft.com/bing/v7.0/search".to_string(),
            bing_api_key: None,
            user_agent: None,
        }
    }
}

impl RetrievalConfig {
    /// Fill the Bing key from `BING_API_KEY` when the config omits it. An
    /// explicit config value always wins.
    pub fn resolve_bing_key_from_env(&mut self) {
        if self.bing_api_key.is_none() {
            self.bing_api_key = std::env::var("BING_API_KEY").ok();
        }
    }
}

/// Answer ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum answers kept after filtering.
    pub max_results: usize,
    /// Minimum pre-vote score an answer needs to survive the cut.
    pub min_score: f32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            min_score: 0.0,
        }
    }
}

impl SibylConfig {
    /// Check the configuration for values the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`SibylError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(SibylError::Config("server.host must not be empty".into()));
        }
        if self.retrieval.miners.is_empty() {
            return Err(SibylError::Config("at least one miner must be configured".into()));
        }
        if self.retrieval.max_results == 0 {
            return Err(SibylError::Config("retrieval.max_results must be at least 1".into()));
        }
        if self.retrieval.per_miner_results == 0 {
            return Err(SibylError::Config(
                "retrieval.per_miner_results must be at least 1".into(),
            ));
        }
        if self.retrieval.timeout_seconds == 0 {
            return Err(SibylError::Config("retrieval.timeout_seconds must be at least 1".into()));
        }
        if self.retrieval.bing_endpoint.is_empty() {
            return Err(SibylError::Config("retrieval.bing_endpoint must not be empty".into()));
        }
        if self.ranking.max_results == 0 {
            return Err(SibylError::Config("ranking.max_results must be at least 1".into()));
        }
        Ok(())
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SibylError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| SibylError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/sibyl/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("sibyl").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("sibyl")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/sibyl-config/config.toml")
        }
    }
}

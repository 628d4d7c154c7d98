//! Configuration system (layered: defaults < config file < env < flags).
//!
//! The API credential is deliberately absent from every layer here: it is
//! supplied per session and never read from or written to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{FinAgentError, Result};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.duckduckgo.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const CONFIG_FILE_NAME: &str = "finagent.toml";

/// Endpoints and runtime settings for the agent, its tools and the server.
#[derive(Debug, Clone, PartialEq)]
pub struct FinAgentConfig {
    pub groq_base_url: String,
    pub yahoo_base_url: String,
    pub search_base_url: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
}

impl Default for FinAgentConfig {
    fn default() -> Self {
        Self {
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape of `finagent.toml`. Unknown keys (including any attempt to
/// store an `api_key`) are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    groq_base_url: Option<String>,
    yahoo_base_url: Option<String>,
    search_base_url: Option<String>,
    bind_addr: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl FinAgentConfig {
    /// Resolve the full layered config from the default file location and
    /// the process environment (after loading `.env` if present).
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();
        if let Some(path) = discover_config_file() {
            tracing::debug!(path = %path.display(), "loading config file");
            config.apply_file(&path)?;
        }
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from a TOML config file.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw)?;

        if let Some(url) = file.groq_base_url {
            self.groq_base_url = url;
        }
        if let Some(url) = file.yahoo_base_url {
            self.yahoo_base_url = url;
        }
        if let Some(url) = file.search_base_url {
            self.search_base_url = url;
        }
        if let Some(addr) = file.bind_addr {
            self.bind_addr = addr;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Overlay `FINAGENT_*` variables using the given lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url_mappings: [(&str, &mut String); 4] = [
            ("FINAGENT_GROQ_BASE_URL", &mut self.groq_base_url),
            ("FINAGENT_YAHOO_BASE_URL", &mut self.yahoo_base_url),
            ("FINAGENT_SEARCH_BASE_URL", &mut self.search_base_url),
            ("FINAGENT_BIND", &mut self.bind_addr),
        ];
        for (env_var, slot) in url_mappings {
            if let Some(value) = lookup(env_var) {
                *slot = value;
            }
        }

        if let Some(raw) = lookup("FINAGENT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                FinAgentError::Configuration(format!(
                    "FINAGENT_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Build the HTTP client shared by the model provider and the tools.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .pool_max_idle_per_host(10)
            .user_agent(concat!("finagent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FinAgentError::Network)
    }
}

/// `FINAGENT_CONFIG` wins, then `./finagent.toml`, then the platform config dir.
fn discover_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("FINAGENT_CONFIG") {
        return Some(PathBuf::from(explicit));
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    directories::ProjectDirs::from("", "", "finagent")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

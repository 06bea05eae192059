use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".pr-linker.toml";

/// Environment variables consulted for the API token, in order.
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "HUBOT_GITHUB_API_TOKEN"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-linker.toml.
/// All fields are optional; the listener runs with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub listener: ListenerConfig,
}

#[derive(Clone, Deserialize)]
pub struct GitHubConfig {
    /// API token. If None, falls back to GITHUB_TOKEN / HUBOT_GITHUB_API_TOKEN.
    pub token: Option<String>,
    /// Base URL of the REST API, without trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Upper bound for a single fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenerConfig {
    /// Sent whenever someone pastes a pull request listing URL.
    #[serde(default = "default_pulls_reminder")]
    pub pulls_reminder: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            pulls_reminder: default_pulls_reminder(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "pr-linker".to_string()
}

fn default_pulls_reminder() -> String {
    "PEOPLE. There are pull requests to review.".to_string()
}

impl Config {
    /// Load configuration from `path`, or from .pr-linker.toml in the current
    /// directory when no path is given. A missing default file yields the
    /// default config; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        if config.github.token.is_none() {
            config.github.token = token_from_env();
        }

        Ok(config)
    }

    /// Load from a specific path without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

fn token_from_env() -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

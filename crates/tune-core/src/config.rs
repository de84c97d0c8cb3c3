//! Configuration file support.
//!
//! Configuration precedence:
//! 1. Environment variables (`TUNE_API_URL`, `HTTPS_PROXY`, `TUNE_TOKEN_FILE`,
//!    `TUNE_AUTH_FILE`)
//! 2. Local config file (`./.tunerc`)
//! 3. Global config file (`$TUNE_HOME/config.toml`, default `~/.tune/config.toml`)
//! 4. Defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::http::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, HttpConfig};

/// Configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TuneConfig {
    /// API base URL
    #[serde(default)]
    pub api_url: Option<String>,

    /// Proxy for HTTPS requests
    #[serde(default)]
    pub https_proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Token storage file
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Provider `auth.json` consulted when no token is stored
    #[serde(default)]
    pub auth_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TuneConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Directory holding the global config and token file.
    ///
    /// `TUNE_HOME` if set, otherwise `~/.tune`.
    pub fn home_dir() -> PathBuf {
        Self::home_dir_with(|name| std::env::var(name).ok())
    }

    fn home_dir_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(home) = env("TUNE_HOME").filter(|h| !h.is_empty()) {
            return PathBuf::from(home);
        }
        env("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from).join(".tune")
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".tunerc")
    }

    /// Discover and load configuration files, then apply environment overrides.
    ///
    /// Missing or unreadable files are skipped.
    pub fn discover_and_load() -> Self {
        let mut config = Self::default();

        if let Ok(global_config) = Self::load_from_file(&Self::default_global_path()) {
            config.merge(&global_config);
        }

        // Local config overrides global config
        if let Ok(local_config) = Self::load_from_file(&Self::default_local_path()) {
            config.merge(&local_config);
        }

        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref api_url) = other.api_url {
            self.api_url = Some(api_url.clone());
        }
        if let Some(ref https_proxy) = other.https_proxy {
            self.https_proxy = Some(https_proxy.clone());
        }
        if let Some(timeout_secs) = other.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
        if let Some(ref token_file) = other.token_file {
            self.token_file = Some(token_file.clone());
        }
        if let Some(ref auth_file) = other.auth_file {
            self.auth_file = Some(auth_file.clone());
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
    }

    /// Overrides values from environment variables looked up with `env`.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| env(name).filter(|value| !value.is_empty());

        if let Some(api_url) = non_empty("TUNE_API_URL") {
            self.api_url = Some(api_url);
        }
        if let Some(proxy) = non_empty("HTTPS_PROXY").or_else(|| non_empty("https_proxy")) {
            self.https_proxy = Some(proxy);
        }
        if let Some(token_file) = non_empty("TUNE_TOKEN_FILE") {
            self.token_file = Some(PathBuf::from(token_file));
        }
        if let Some(auth_file) = non_empty("TUNE_AUTH_FILE") {
            self.auth_file = Some(PathBuf::from(auth_file));
        }
    }

    /// Token storage file, defaulting to `<home>/tokens.json`.
    pub fn token_file(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(|| Self::home_dir().join("tokens.json"))
    }

    /// Provider auth file, defaulting to Composer's `auth.json`.
    ///
    /// `$COMPOSER_HOME/auth.json` if set, otherwise `~/.composer/auth.json`.
    pub fn auth_file(&self) -> PathBuf {
        self.auth_file
            .clone()
            .unwrap_or_else(|| Self::composer_auth_file_with(|name| std::env::var(name).ok()))
    }

    fn composer_auth_file_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        let composer_home = env("COMPOSER_HOME").filter(|h| !h.is_empty()).map_or_else(
            || env("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from).join(".composer"),
            PathBuf::from,
        );
        composer_home.join("auth.json")
    }

    /// HTTP settings for resource and authentication handlers.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            api_url: self.api_url.clone().unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            https_proxy: self.https_proxy.clone(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

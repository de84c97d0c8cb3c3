//! Blocking HTTP client construction.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Proxy;
use tracing::debug;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent with every request.
pub const USER_AGENT: &str = "tune-script";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the HTTP client shared by resource and authentication handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// API base URL without trailing slash.
    pub api_url: String,
    /// Proxy for every API request. System proxy lookup is disabled.
    pub https_proxy: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            https_proxy: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Creates a configuration pointing at `api_url`.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self { api_url: api_url.into(), ..Self::default() }
    }

    /// Returns `api_url` joined with `path`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Builds a blocking client that sends requests through `https_proxy`, if set.
    pub fn build_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT).timeout(self.timeout).no_proxy();

        if let Some(proxy) = self.https_proxy.as_deref().filter(|p| !p.is_empty()) {
            debug!(proxy = %proxy, "Using HTTPS proxy");
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = HttpConfig::with_api_url("http://127.0.0.1:1234/");
        assert_eq!(config.endpoint("/gists/abc"), "http://127.0.0.1:1234/gists/abc");
        assert_eq!(config.endpoint("authorizations"), "http://127.0.0.1:1234/authorizations");
    }

    #[test]
    fn test_default_points_at_github() {
        let config = HttpConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.https_proxy.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_build_client_with_proxy() {
        let config = HttpConfig {
            https_proxy: Some("http://proxy.local:3128".to_string()),
            ..HttpConfig::default()
        };
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn test_empty_proxy_is_ignored() {
        let config = HttpConfig { https_proxy: Some(String::new()), ..HttpConfig::default() };
        assert!(config.build_client().is_ok());
    }
}

//! Read-only fallback for tokens issued outside of tune.
//!
//! Package managers commonly keep provider tokens in an `auth.json` file keyed
//! by provider domain:
//!
//! ```json
//! { "github-oauth": { "github.com": "<token>" } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct AuthJson {
    #[serde(rename = "github-oauth", default)]
    github_oauth: HashMap<String, String>,
}

/// Provider tokens keyed by domain, loaded from an `auth.json` file.
#[derive(Debug, Clone)]
pub struct ProviderAuthFile {
    path: PathBuf,
}

impl ProviderAuthFile {
    /// Creates a fallback reader for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the GitHub OAuth token for `domain`.
    ///
    /// A missing or malformed file is treated as having no token.
    pub fn github_oauth(&self, domain: &str) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No provider auth file");
                return None;
            }
        };

        match serde_json::from_str::<AuthJson>(&contents) {
            Ok(auth) => auth.github_oauth.get(domain).cloned(),
            Err(e) => {
                debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring malformed provider auth file"
                );
                None
            }
        }
    }
}

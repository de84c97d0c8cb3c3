//! Token storage and persistence.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AuthError, AuthResult};
use super::token::Token;

/// Current version of the token file format.
const TOKENS_VERSION: &str = "1.0";

/// Token file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokensFile {
    /// Version of the token file format.
    version: String,
    /// Map of resource key to token attributes.
    #[serde(default)]
    tokens: BTreeMap<String, BTreeMap<String, String>>,
}

/// Process-scoped mapping from resource key to [`Token`].
///
/// Storage is loaded once at startup, mutated when an authentication succeeds
/// and flushed with [`TokenStorage::save`] at shutdown. Only safe tokens are
/// written back; transient tokens live for the current process only.
///
/// # Examples
///
/// ```no_run
/// use tune_core::auth::{Token, TokenStorage};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut storage = TokenStorage::load("/tmp/tokens.json")?;
/// storage.set("gist", Token::safe([("oauth_token", "abc123")]));
/// storage.save()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TokenStorage {
    file_path: Option<PathBuf>,
    tokens: HashMap<String, Token>,
}

impl TokenStorage {
    /// Creates a storage that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads tokens from the given file.
    ///
    /// A missing file yields an empty storage bound to that path.
    pub fn load(path: impl Into<PathBuf>) -> AuthResult<Self> {
        let file_path = path.into();
        let mut tokens = HashMap::new();

        if file_path.exists() {
            let mut file = File::open(&file_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;

            let parsed: TokensFile = serde_json::from_str(&contents)?;
            for (key, attributes) in parsed.tokens {
                tokens.insert(key, Token::safe(attributes));
            }
            debug!(path = %file_path.display(), count = tokens.len(), "Loaded stored tokens");
        }

        Ok(Self { file_path: Some(file_path), tokens })
    }

    /// Returns the backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the token stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.get(key)
    }

    /// Stores `token` under `key`, replacing any previous token.
    pub fn set(&mut self, key: impl Into<String>, token: Token) {
        let key = key.into();
        debug!(key = %key, safe = token.is_safe(), "Storing token");
        self.tokens.insert(key, token);
    }

    /// Removes the token stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Token> {
        self.tokens.remove(key)
    }

    /// Lists stored keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no token is stored.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Writes safe tokens back to the token file.
    ///
    /// Does nothing for in-memory storage.
    pub fn save(&self) -> AuthResult<()> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let tokens = self
            .tokens
            .iter()
            .filter(|(_, token)| token.is_safe())
            .map(|(key, token)| (key.clone(), token.attributes().clone()))
            .collect();
        let contents = TokensFile { version: TOKENS_VERSION.to_string(), tokens };

        Self::ensure_parent_dir(file_path)?;

        let json = serde_json::to_string_pretty(&contents)?;
        let mut file = File::create(file_path)?;
        file.write_all(json.as_bytes())?;

        // Set file permissions to 0600 (rw-------)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(file_path, perms)?;
        }

        debug!(path = %file_path.display(), count = contents.tokens.len(), "Saved tokens");
        Ok(())
    }

    /// Ensures the token directory exists with owner-only permissions.
    fn ensure_parent_dir(file_path: &Path) -> AuthResult<()> {
        let dir = file_path.parent().ok_or_else(|| {
            AuthError::PermissionDenied(format!("no parent directory for {}", file_path.display()))
        })?;

        if dir.as_os_str().is_empty() {
            return Ok(());
        }

        if !dir.exists() {
            fs::create_dir_all(dir)?;

            // Set directory permissions to 0700 (rwx------)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = fs::Permissions::from_mode(0o700);
                fs::set_permissions(dir, perms)?;
            }
        }

        Ok(())
    }
}

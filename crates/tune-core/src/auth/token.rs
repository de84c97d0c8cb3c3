//! Security tokens returned by a successful authentication.

use std::collections::BTreeMap;

/// Attribute holding an OAuth token string.
pub const OAUTH_TOKEN: &str = "oauth_token";

/// Whether a token outlives the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPersistence {
    /// Written to the token file on shutdown.
    Safe,
    /// Kept for the current session only, never written to disk.
    Transient,
}

/// Authentication token.
///
/// A token is an immutable bag of named attributes (e.g. `oauth_token`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    attributes: BTreeMap<String, String>,
    persistence: TokenPersistence,
}

impl Token {
    /// Creates a token that must be persisted across sessions.
    pub fn safe<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_persistence(attributes, TokenPersistence::Safe)
    }

    /// Creates a token that must never be persisted.
    pub fn transient<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_persistence(attributes, TokenPersistence::Transient)
    }

    fn with_persistence<K, V>(
        attributes: impl IntoIterator<Item = (K, V)>,
        persistence: TokenPersistence,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            persistence,
        }
    }

    /// Returns all attributes of this token.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns a single attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the OAuth token attribute, if present.
    pub fn oauth_token(&self) -> Option<&str> {
        self.attribute(OAUTH_TOKEN)
    }

    /// Returns the persistence tag of this token.
    pub const fn persistence(&self) -> TokenPersistence {
        self.persistence
    }

    /// Returns true if the token should be written to the token file.
    pub const fn is_safe(&self) -> bool {
        matches!(self.persistence, TokenPersistence::Safe)
    }
}

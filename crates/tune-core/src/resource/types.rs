//! Types for remote resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;

/// Supported resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// GitHub Gist
    Gist,
}

impl ResourceKind {
    /// Returns the string identity of the kind.
    ///
    /// The identity doubles as the token storage key, so every resource of a
    /// kind shares one stored token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gist => "gist",
        }
    }

    /// Parses a resource kind from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - The string to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(ResourceKind)` if the string matches a known kind, `None` otherwise.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gist" => Some(Self::Gist),
            _ => None,
        }
    }

    /// Returns all supported resource kinds.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Gist]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Remote identifier.
    pub id: String,
    /// Login of the owner.
    pub owner: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Number of revisions.
    pub revision: usize,
    /// Browser URL.
    pub uri: String,
}

/// A script resource.
///
/// Before authentication succeeds a resource may be an empty placeholder that
/// only knows its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    content: String,
    metadata: Option<Metadata>,
}

impl Resource {
    /// Creates a fetched resource.
    pub fn new(kind: ResourceKind, content: impl Into<String>, metadata: Metadata) -> Self {
        Self { kind, content: content.into(), metadata: Some(metadata) }
    }

    /// Creates an empty resource that only carries its kind.
    #[must_use]
    pub fn placeholder(kind: ResourceKind) -> Self {
        Self { kind, content: String::new(), metadata: None }
    }

    /// Kind of this resource.
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Token storage key for this resource.
    pub const fn key(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Script content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Remote metadata, absent for placeholders.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }
}

/// Errors that can occur while creating a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Access was denied; authenticate for `resource` and try again.
    #[error("authentication required: {message}")]
    AuthenticationRequired {
        /// The resource that needs a token.
        resource: Box<Resource>,
        /// Message reported by the remote end.
        message: String,
    },

    /// The URI or the remote content cannot be used.
    #[error("{0}")]
    Validation(String),

    /// No handler recognizes the URI.
    #[error("unsupported resource URI: {0}")]
    UnsupportedUri(String),

    /// The remote response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error occurred.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResourceError {
    /// Creates a new AuthenticationRequired signal.
    pub fn authentication_required(resource: Resource, message: impl Into<String>) -> Self {
        Self::AuthenticationRequired { resource: Box::new(resource), message: message.into() }
    }

    /// Creates a new Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true for the authentication-required signal.
    pub const fn is_authentication_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

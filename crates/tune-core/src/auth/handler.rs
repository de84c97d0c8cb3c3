//! Pluggable authentication handlers and their dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use super::credentials::{Credentials, RequiredCredentials};
use super::error::AuthResult;
use super::token::Token;
use crate::resource::{Resource, ResourceKind};

/// Authenticates resources of one kind on their behalf.
///
/// Resources only carry their [`ResourceKind`]; the handler registered for
/// that kind knows which credentials to ask for and how to exchange them for
/// a [`Token`].
pub trait AuthenticationHandler: Send + Sync {
    /// The resource kind this handler authenticates.
    fn kind(&self) -> ResourceKind;

    /// Credentials to ask for before calling [`authenticate`](Self::authenticate).
    ///
    /// Must not perform any I/O.
    fn required_credentials(&self) -> RequiredCredentials;

    /// Exchanges credentials for a reusable token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`](super::AuthError::InvalidCredentials)
    /// when a required value is empty or the remote end rejects the exchange.
    fn authenticate(&self, credentials: &Credentials) -> AuthResult<Token>;

    /// Returns true if this handler can authenticate `resource`.
    fn supports_authenticate(&self, resource: &Resource) -> bool {
        resource.kind() == self.kind()
    }

    /// Storage key for tokens issued by this handler.
    fn key(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Registry that maps resource kinds to authentication handlers.
#[derive(Default)]
pub struct AuthenticationRegistry {
    handlers: HashMap<ResourceKind, Arc<dyn AuthenticationHandler>>,
}

impl AuthenticationRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for its kind, replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn AuthenticationHandler>) {
        self.handlers.insert(handler.kind(), handler);
    }

    /// Returns the handler for a resource kind.
    pub fn get(&self, kind: ResourceKind) -> Option<Arc<dyn AuthenticationHandler>> {
        self.handlers.get(&kind).cloned()
    }

    /// Returns the handler able to authenticate `resource`.
    pub fn handler_for(&self, resource: &Resource) -> Option<Arc<dyn AuthenticationHandler>> {
        self.handlers
            .get(&resource.kind())
            .filter(|handler| handler.supports_authenticate(resource))
            .cloned()
    }

    /// Kinds with a registered handler.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

impl std::fmt::Debug for AuthenticationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationRegistry").field("kinds", &self.kinds()).finish()
    }
}

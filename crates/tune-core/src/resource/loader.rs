//! Fetch-then-authenticate resource loading.

use std::io::Write;
use std::sync::Arc;

use tracing::info;

use super::gist::GistHandler;
use super::registry::ResourceRegistry;
use super::types::{Resource, ResourceError, ResourceKind, ResourceResult};
use crate::auth::{
    AuthError, AuthenticationRegistry, Prompter, ProviderAuthFile, ResourceAuthenticationHelper,
    TokenStorage,
};
use crate::http::HttpConfig;

/// Loads resources, authenticating on demand.
///
/// A resource is first fetched with whatever token is stored for its kind. If
/// the remote end asks for authentication, the loader runs the interactive
/// helper with the matching
/// [`AuthenticationHandler`](crate::auth::AuthenticationHandler), stores the
/// new token and fetches once more.
pub struct ResourceLoader<P, W> {
    resources: ResourceRegistry,
    authenticators: AuthenticationRegistry,
    storage: TokenStorage,
    helper: ResourceAuthenticationHelper<P, W>,
}

impl<P: Prompter, W: Write> ResourceLoader<P, W> {
    /// Creates a loader from explicit registries.
    pub fn new(
        resources: ResourceRegistry,
        authenticators: AuthenticationRegistry,
        storage: TokenStorage,
        helper: ResourceAuthenticationHelper<P, W>,
    ) -> Self {
        Self { resources, authenticators, storage, helper }
    }

    /// Creates a loader that handles gists.
    pub fn with_gist(
        http: HttpConfig,
        auth_file: Option<ProviderAuthFile>,
        storage: TokenStorage,
        helper: ResourceAuthenticationHelper<P, W>,
    ) -> ResourceResult<Self> {
        let mut gist = GistHandler::new(http)?;
        if let Some(auth_file) = auth_file {
            gist = gist.with_auth_file(auth_file);
        }
        let gist = Arc::new(gist);

        let mut resources = ResourceRegistry::new();
        resources.register(gist.clone());
        let mut authenticators = AuthenticationRegistry::new();
        authenticators.register(gist);

        Ok(Self::new(resources, authenticators, storage, helper))
    }

    /// Loads the resource behind `uri`.
    ///
    /// Authentication is attempted at most once per call; a second
    /// authentication-required signal is returned to the caller.
    pub fn load(&mut self, uri: &str) -> ResourceResult<Resource> {
        let handler = self
            .resources
            .handler_for(uri)
            .ok_or_else(|| ResourceError::UnsupportedUri(uri.to_string()))?;

        match handler.create_resource(uri, &self.storage) {
            Err(ResourceError::AuthenticationRequired { resource, message }) => {
                info!(key = resource.key(), "{}", message);
                self.authenticate_resource(&resource)?;
                handler.create_resource(uri, &self.storage)
            }
            result => result,
        }
    }

    /// Runs the authentication helper for a resource kind without fetching.
    pub fn authenticate(&mut self, kind: ResourceKind) -> ResourceResult<()> {
        self.authenticate_resource(&Resource::placeholder(kind))
    }

    fn authenticate_resource(&mut self, resource: &Resource) -> ResourceResult<()> {
        let handler = self
            .authenticators
            .handler_for(resource)
            .ok_or_else(|| AuthError::UnsupportedResource(resource.key().to_string()))?;

        let token = self.helper.ask_credentials(handler.as_ref())?;
        self.storage.set(resource.key(), token);
        Ok(())
    }

    /// Stored tokens.
    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    /// Flushes safe tokens to the token file.
    pub fn save(&self) -> ResourceResult<()> {
        self.storage.save()?;
        Ok(())
    }

    /// The interactive helper.
    pub fn helper(&self) -> &ResourceAuthenticationHelper<P, W> {
        &self.helper
    }

    /// Consumes the loader and returns its token storage.
    pub fn into_storage(self) -> TokenStorage {
        self.storage
    }
}

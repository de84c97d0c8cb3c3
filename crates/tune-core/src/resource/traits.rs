//! Traits for resource handling.

use super::types::{Resource, ResourceKind, ResourceResult};
use crate::auth::TokenStorage;

/// A trait for creating resources from URIs of one kind.
///
/// # Authentication
///
/// When the remote end denies access, [`create_resource`](Self::create_resource)
/// must fail with `ResourceError::AuthenticationRequired` so the caller can
/// obtain a token and try again. Handlers never prompt on their own.
pub trait ResourceHandler: Send + Sync {
    /// Returns the kind of resource this handler creates.
    fn kind(&self) -> ResourceKind;

    /// Returns true if this handler recognizes `uri`.
    ///
    /// This is used by the registry to route URIs to the appropriate handler.
    fn supports(&self, uri: &str) -> bool;

    /// Fetches the resource behind `uri`.
    ///
    /// Any token previously stored under this handler's key in `tokens` is
    /// used for the request.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` if the URI is invalid, access is denied, the
    /// remote content cannot be used, or a network error occurs.
    fn create_resource(&self, uri: &str, tokens: &TokenStorage) -> ResourceResult<Resource>;
}

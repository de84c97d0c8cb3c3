//! Tune Core - remote script resources with on-demand authentication.
//!
//! This crate provides:
//! - Resource handlers that fetch scripts from remote URIs (GitHub gists)
//! - Authentication handlers that trade credentials for access tokens
//! - An interactive helper that prompts until credentials are accepted
//! - Token storage and configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use tune_core::auth::{ResourceAuthenticationHelper, TerminalPrompter, TokenStorage};
//! use tune_core::{ResourceLoader, TuneConfig};
//!
//! fn main() -> tune_core::Result<()> {
//!     let config = TuneConfig::discover_and_load();
//!     let storage = TokenStorage::load(config.token_file())?;
//!     let helper = ResourceAuthenticationHelper::new(TerminalPrompter::new(), std::io::stdout());
//!     let mut loader = ResourceLoader::with_gist(config.http_config(), None, storage, helper)?;
//!
//!     let resource = loader.load("https://gist.github.com/octocat/6cad326836d38bd3a7ae")?;
//!     println!("{}", resource.content());
//!     loader.save()?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;

pub use auth::{
    AuthError, AuthenticationHandler, AuthenticationRegistry, CredentialKind, Credentials,
    RequiredCredentials, ResourceAuthenticationHelper, Token, TokenPersistence, TokenStorage,
};
pub use config::{ConfigError, TuneConfig};
pub use error::{Result, TuneError};
pub use http::HttpConfig;
pub use resource::{
    GistHandler, Metadata, Resource, ResourceError, ResourceHandler, ResourceKind, ResourceLoader,
    ResourceRegistry,
};

//! Authentication and token management.
//!
//! This module obtains, stores and reuses security tokens for remote resources.
//!
//! # Features
//!
//! - [`Token`]: immutable attribute bag, either safe (persisted) or transient
//! - [`TokenStorage`]: resource key to token mapping persisted in `tokens.json`
//! - [`AuthenticationHandler`]: per resource kind credential exchange, selected
//!   through an [`AuthenticationRegistry`]
//! - [`ResourceAuthenticationHelper`]: interactive prompt/retry loop
//!
//! # Example
//!
//! ```no_run
//! use tune_core::auth::{ResourceAuthenticationHelper, TerminalPrompter, TokenStorage};
//! use tune_core::resource::GistHandler;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut storage = TokenStorage::load("/home/me/.tune/tokens.json")?;
//! let handler = GistHandler::new(Default::default())?;
//!
//! let mut helper = ResourceAuthenticationHelper::new(TerminalPrompter::new(), std::io::stdout());
//! let token = helper.ask_credentials(&handler)?;
//! storage.set("gist", token);
//! storage.save()?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod handler;
mod helper;
mod prompt;
mod provider_file;
mod storage;
mod token;

pub use credentials::{CredentialKind, Credentials, RequiredCredentials};
pub use error::{AuthError, AuthResult};
pub use handler::{AuthenticationHandler, AuthenticationRegistry};
pub use helper::{AUTHENTICATION_REQUIRED_BANNER, ResourceAuthenticationHelper};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use provider_file::ProviderAuthFile;
pub use storage::TokenStorage;
pub use token::{OAUTH_TOKEN, Token, TokenPersistence};

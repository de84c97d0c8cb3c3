//! Remote script resources.
//!
//! This module turns URIs into [`Resource`]s. Each resource kind has a
//! [`ResourceHandler`]; the [`ResourceRegistry`] routes a URI to the first
//! handler that supports it, and the [`ResourceLoader`] ties fetching to the
//! authentication flow in [`crate::auth`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tune_core::auth::{ResourceAuthenticationHelper, TerminalPrompter, TokenStorage};
//! use tune_core::http::HttpConfig;
//! use tune_core::resource::ResourceLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let helper = ResourceAuthenticationHelper::new(TerminalPrompter::new(), std::io::stdout());
//! let storage = TokenStorage::load("/home/me/.tune/tokens.json")?;
//! let mut loader = ResourceLoader::with_gist(HttpConfig::default(), None, storage, helper)?;
//!
//! let resource = loader.load("https://gist.github.com/octocat/aa5a315d61ae9438b18d")?;
//! println!("{}", resource.content());
//! loader.save()?;
//! # Ok(())
//! # }
//! ```

mod gist;
mod loader;
mod registry;
mod traits;
mod types;

pub use gist::{GistHandler, parse_gist_id};
pub use loader::ResourceLoader;
pub use registry::ResourceRegistry;
pub use traits::ResourceHandler;
pub use types::{Metadata, Resource, ResourceError, ResourceKind, ResourceResult};

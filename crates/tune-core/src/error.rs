//! Error types for Tune Core.

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::resource::ResourceError;
use thiserror::Error;

/// Core error type for Tune operations.
#[derive(Error, Debug)]
pub enum TuneError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Resource errors
    #[error("{0}")]
    Resource(#[from] ResourceError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Tune operations.
pub type Result<T> = std::result::Result<T, TuneError>;

//! Error types for authentication operations.

use thiserror::Error;

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The supplied credentials were rejected or incomplete.
    ///
    /// This is the only recoverable variant: the authentication helper reports
    /// it and asks for every credential again.
    #[error("{0}")]
    InvalidCredentials(String),

    /// No authentication handler is registered for the resource kind.
    #[error("No authentication handler for resource: {0}")]
    UnsupportedResource(String),

    /// The interactive input stream was closed while answering a prompt.
    #[error("Input stream closed while reading credentials")]
    Interrupted,

    /// The authentication loop was cancelled between two attempts.
    #[error("Authentication cancelled")]
    Cancelled,

    /// The credential exchange request could not be performed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error occurred during file or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Permission denied error.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl AuthError {
    /// Creates a new InvalidCredentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }

    /// Returns true if the authentication helper may ask again after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidCredentials(_))
    }
}

/// Result type alias for authentication operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_displays_message_only() {
        let err = AuthError::invalid_credentials("Bad credentials");
        assert_eq!(format!("{}", err), "Bad credentials");
    }

    #[test]
    fn test_only_invalid_credentials_is_recoverable() {
        assert!(AuthError::invalid_credentials("nope").is_recoverable());
        assert!(!AuthError::Interrupted.is_recoverable());
        assert!(!AuthError::Cancelled.is_recoverable());
        assert!(!AuthError::UnsupportedResource("gist".to_string()).is_recoverable());
    }

    #[test]
    fn test_auth_error_unsupported_resource() {
        let err = AuthError::UnsupportedResource("pastebin".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("No authentication handler"));
        assert!(msg.contains("pastebin"));
    }

    #[test]
    fn test_auth_error_permission_denied() {
        let err = AuthError::PermissionDenied("HOME not set".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("HOME not set"));
    }

    #[test]
    fn test_auth_error_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: AuthError = io_err.into();
        assert!(matches!(err, AuthError::Io(_)));
    }
}

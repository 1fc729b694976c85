//! Client error types

use shared::auth::AuthCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response arrived but not in the shape we expect
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The account service rejected the credentials
    #[error("{}", .0.message())]
    Auth(AuthCode),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// The auth vocabulary word carried by this error, if any.
    pub fn auth_code(&self) -> Option<&AuthCode> {
        match self {
            ClientError::Auth(code) => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_displays_friendly_message() {
        let err = ClientError::Auth(AuthCode::WrongPassword);
        assert_eq!(err.to_string(), "Incorrect password. Please try again.");
    }

    #[test]
    fn auth_code_accessor_only_matches_auth_variant() {
        let err = ClientError::Auth(AuthCode::EmailExists);
        assert_eq!(err.auth_code(), Some(&AuthCode::EmailExists));
        assert!(ClientError::Unauthorized.auth_code().is_none());
    }
}

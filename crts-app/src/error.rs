//! Application error types

use shared::auth::AuthCode;
use shared::models::ComplaintStatus;
use thiserror::Error;

use crts_client::ClientError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// The account service rejected the request
    #[error("{}", .0.message())]
    Auth(AuthCode),

    /// Input rejected locally, before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested status change is not legal from the stored status
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    /// Resource not found (or not visible to this session)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session's role does not permit the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backend could not be reached or answered out of contract
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Auth(code) => AppError::Auth(code),
            ClientError::NotFound(what) => AppError::NotFound(what),
            ClientError::Unauthorized => {
                AppError::Unauthorized("Session token missing or expired".to_string())
            }
            ClientError::Forbidden(what) => AppError::Unauthorized(what),
            ClientError::Validation(what) => AppError::Validation(what),
            other => AppError::Transport(other.to_string()),
        }
    }
}

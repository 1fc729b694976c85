//! Shared types for the CRTS workspace
//!
//! Data model, account-service vocabulary, response envelope, and the
//! validation/time helpers used by the client, application, and mock-backend
//! crates.

pub mod auth;
pub mod models;
pub mod response;
pub mod util;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use auth::{AuthCode, Credentials, TokenGrant};
pub use models::{
    Complaint, ComplaintDraft, ComplaintStatus, Priority, Role, StatusUpdate, UserAccount,
};
pub use response::{API_CODE_SUCCESS, ApiResponse};

//! Backend access for the complaint tracking system.
//!
//! Two services live behind one REST surface: the account service
//! (sign-up / sign-in, returning a uid and bearer token) and the document
//! store (schemaless records in named collections). The store is behind
//! the [`DocumentStore`] contract so application code runs unchanged
//! against the hosted backend ([`RestStore`]) or an in-process map
//! ([`MemoryStore`]).

pub mod accounts;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use accounts::AccountClient;
pub use config::{ClientConfig, DEFAULT_STAFF_SIGNUP_CODE};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use store::{Document, DocumentStore, MemoryStore, RestStore};

// Re-export shared types for convenience
pub use shared::auth::{AuthCode, Credentials, TokenGrant};
pub use shared::response::{API_CODE_SUCCESS, ApiResponse};

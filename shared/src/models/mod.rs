//! Data models
//!
//! Shared between the application core, the backend clients, and the mock
//! server. Record structs serialize to the stored wire field names; document
//! ids are assigned by the store and never part of the stored record.

pub mod account;
pub mod complaint;
pub mod status_update;

// Re-exports
pub use account::*;
pub use complaint::*;
pub use status_update::*;

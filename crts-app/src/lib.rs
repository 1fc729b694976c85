//! Application core for the complaint tracking system.
//!
//! Everything a front-end needs, with no widgets attached: sign-in portals
//! producing an explicit [`Session`], the [`ComplaintService`] lifecycle
//! manager over the document store, the user [`Directory`], and
//! [`TaskScope`] for tying backend calls to a view's lifetime.

pub mod complaints;
pub mod directory;
pub mod error;
pub mod logger;
pub mod portal;
pub mod session;
pub mod tasks;

pub use complaints::{ComplaintFilter, ComplaintService, StatusSummary};
pub use directory::Directory;
pub use error::{AppError, AppResult};
pub use logger::init_logger;
pub use portal::{Portal, PortalKind, SignedIn, SignedOut, StaffPortal, UserPortal};
pub use session::Session;
pub use tasks::{ScopedTask, TaskError, TaskScope};

// Re-export the model types callers handle directly
pub use shared::models::{
    Complaint, ComplaintDraft, ComplaintStatus, Priority, Role, StatusUpdate, UserAccount,
};

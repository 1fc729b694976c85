//! Explicit session value
//!
//! Identity and authorization travel with the caller: every operation that
//! needs to know who acts takes a `&Session`. Nothing is global; two
//! sessions can coexist in one process (e.g. tests driving a user and a
//! staff member side by side).

use shared::models::Role;

/// A signed-in identity.
#[derive(Debug, Clone)]
pub struct Session {
    /// Account id issued by the account service.
    pub uid: String,
    /// Sign-in email.
    pub email: String,
    /// Display name, recorded on audit entries.
    pub name: String,
    /// Authorization role.
    pub role: Role,
    /// Bearer token for store requests.
    pub token: String,
}

impl Session {
    /// True when the role may drive complaint transitions.
    pub fn can_transition(&self) -> bool {
        self.role.can_transition()
    }

    /// True when the role sees every complaint rather than only its own.
    pub fn sees_all_complaints(&self) -> bool {
        self.role.sees_all_complaints()
    }
}

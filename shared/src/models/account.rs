//! User accounts and roles

use serde::{Deserialize, Serialize};

/// Authorization role. Determines read scope and transition rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Staff,
    Admin,
}

impl Role {
    /// Staff or admin, the elevated roles.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    /// Staff and admins may perform status transitions.
    pub fn can_transition(self) -> bool {
        self.is_staff()
    }

    /// Staff and admins see every complaint; users only their own.
    pub fn sees_all_complaints(self) -> bool {
        self.is_staff()
    }

    /// Wire representation (`user`, `staff`, `admin`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity + authorization record stored in the `users` collection.
///
/// `id` is the account uid issued at sign-up and doubles as the document
/// key; it is not part of the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

//! User directory and profile operations
//!
//! Listing accounts and changing roles is the staff/admin side of the
//! original admin portal; renaming is the one profile edit every account
//! may make on itself.

use std::sync::Arc;

use serde_json::json;

use crts_client::DocumentStore;
use shared::models::{Role, UserAccount};
use shared::validation::{MAX_NAME_LEN, validate_required_text};

use crate::error::{AppError, AppResult};
use crate::session::Session;

pub(crate) const USERS: &str = "users";

/// Account directory over the `users` collection.
#[derive(Debug, Clone)]
pub struct Directory {
    store: Arc<dyn DocumentStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All registered accounts, ordered by email. Staff and admin only.
    pub async fn list_users(&self, session: &Session) -> AppResult<Vec<UserAccount>> {
        if !session.role.is_staff() {
            return Err(AppError::Unauthorized(
                "Only staff may browse the user directory".to_string(),
            ));
        }
        let docs = self.store.query_all(USERS, "email", false).await?;
        let accounts = docs
            .iter()
            .filter_map(|doc| match doc.parse::<UserAccount>() {
                Ok(mut account) => {
                    account.id = doc.id.clone();
                    Some(account)
                }
                Err(e) => {
                    tracing::warn!(id = %doc.id, error = %e, "Skipping malformed user record");
                    None
                }
            })
            .collect();
        Ok(accounts)
    }

    /// Set another account's role. Admin only; changing one's own role is
    /// permitted, including away from admin.
    pub async fn change_role(&self, session: &Session, uid: &str, role: Role) -> AppResult<()> {
        if session.role != Role::Admin {
            return Err(AppError::Unauthorized(
                "Only an admin may change roles".to_string(),
            ));
        }
        self.store.update(USERS, uid, json!({ "role": role })).await?;
        tracing::info!(uid = %uid, role = %role, by = %session.uid, "Role changed");
        Ok(())
    }

    /// Update the session's own display name, returning the refreshed
    /// session value for the caller to carry forward.
    pub async fn rename(&self, session: &Session, new_name: &str) -> AppResult<Session> {
        validate_required_text(new_name, "name", MAX_NAME_LEN).map_err(AppError::Validation)?;
        let name = new_name.trim().to_string();
        self.store
            .update(USERS, &session.uid, json!({ "name": name }))
            .await?;
        tracing::info!(uid = %session.uid, "Display name updated");
        Ok(Session {
            name,
            ..session.clone()
        })
    }
}

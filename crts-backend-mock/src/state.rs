//! Mock backend state

use crts_client::MemoryStore;
use dashmap::DashMap;

/// Failed sign-in attempts tolerated before the account is locked out.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// One registered account.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uid: String,
    pub password: String,
    pub disabled: bool,
    pub failed_attempts: u32,
}

/// Shared state behind the mock routes.
#[derive(Debug, Default)]
pub struct AppState {
    /// Accounts keyed by email.
    pub accounts: DashMap<String, AccountRecord>,
    /// Issued bearer tokens, token to uid.
    pub tokens: DashMap<String, String>,
    /// Document store backing the `/store` routes.
    pub store: MemoryStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account, returning its uid. Tests use this to set up
    /// disabled or locked accounts without going through sign-up.
    pub fn seed_account(&self, email: &str, password: &str, disabled: bool) -> String {
        let uid = uuid::Uuid::new_v4().simple().to_string();
        self.accounts.insert(
            email.to_string(),
            AccountRecord {
                uid: uid.clone(),
                password: password.to_string(),
                disabled,
                failed_attempts: 0,
            },
        );
        uid
    }
}

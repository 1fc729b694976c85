//! Typed sign-in portals
//!
//! The two launchable front-ends differ only in who they admit and what
//! role self-signup grants, so both are the same `Portal` type with a kind
//! marker. The signed-in/signed-out distinction is a typestate: operations
//! that need a session only exist on `Portal<_, SignedIn>`, and `sign_in`
//! consumes the signed-out portal, handing it back inside the error so a
//! failed attempt can be retried.

use std::marker::PhantomData;
use std::sync::Arc;

use crts_client::{AccountClient, ClientConfig, DocumentStore, HttpClient, RestStore};
use shared::models::{Role, UserAccount};
use shared::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, looks_like_email, validate_required_text,
};

use crate::complaints::ComplaintService;
use crate::directory::{Directory, USERS};
use crate::error::AppError;
use crate::session::Session;

// ============================================================================
// Kind Markers
// ============================================================================

/// Submitter-facing portal. Admits every role; self-signup grants `user`.
#[derive(Debug, Clone, Copy)]
pub struct UserPortal;

/// Staff/admin portal. Admits elevated roles only; self-signup is gated by
/// the shared code and grants `staff`.
#[derive(Debug, Clone, Copy)]
pub struct StaffPortal;

/// Sealed trait for portal kinds.
pub trait PortalKind: kind_private::Sealed + Send + Sync + 'static {
    /// Portal name used in messages and log events.
    const NAME: &'static str;
    /// Role granted by self-signup through this portal.
    const SIGNUP_ROLE: Role;
    /// Whether an account with this role may sign in here.
    fn admits(role: Role) -> bool;
}

impl PortalKind for UserPortal {
    const NAME: &'static str = "user";
    const SIGNUP_ROLE: Role = Role::User;
    fn admits(_role: Role) -> bool {
        true
    }
}

impl PortalKind for StaffPortal {
    const NAME: &'static str = "staff";
    const SIGNUP_ROLE: Role = Role::Staff;
    fn admits(role: Role) -> bool {
        role.is_staff()
    }
}

mod kind_private {
    pub trait Sealed {}
    impl Sealed for super::UserPortal {}
    impl Sealed for super::StaffPortal {}
}

// ============================================================================
// State Markers
// ============================================================================

/// Signed-out state. Available transitions: `sign_in`, `sign_up`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOut;

/// Signed-in state, carrying the session and the authenticated store.
#[derive(Debug)]
pub struct SignedIn {
    session: Session,
    store: Arc<dyn DocumentStore>,
}

/// Sealed trait for portal states.
pub trait PortalState: state_private::Sealed + Send + Sync + 'static {}
impl PortalState for SignedOut {}
impl PortalState for SignedIn {}

mod state_private {
    pub trait Sealed {}
    impl Sealed for super::SignedOut {}
    impl Sealed for super::SignedIn {}
}

// ============================================================================
// Portal
// ============================================================================

/// One front-end's entry point.
///
/// The portal owns one HTTP connection pool; the authenticated store built
/// at sign-in shares it rather than opening a second one.
#[derive(Debug)]
pub struct Portal<P: PortalKind, S: PortalState> {
    config: ClientConfig,
    accounts: AccountClient,
    http: HttpClient,
    state: S,
    _kind: PhantomData<P>,
}

impl Portal<UserPortal, SignedOut> {
    /// Portal for complaint submitters.
    pub fn user(config: ClientConfig) -> Self {
        Self::signed_out(config)
    }

    /// Create a `user` account and sign in.
    pub async fn sign_up(
        self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Portal<UserPortal, SignedIn>, (AppError, Self)> {
        self.sign_up_as(name, email, password).await
    }
}

impl Portal<StaffPortal, SignedOut> {
    /// Portal for staff and admins.
    pub fn staff(config: ClientConfig) -> Self {
        Self::signed_out(config)
    }

    /// Create a `staff` account and sign in.
    ///
    /// A wrong signup code is rejected locally, before any network call.
    pub async fn sign_up(
        self,
        name: &str,
        email: &str,
        password: &str,
        signup_code: &str,
    ) -> Result<Portal<StaffPortal, SignedIn>, (AppError, Self)> {
        if signup_code != self.config.staff_signup_code {
            return Err((
                AppError::Validation("Invalid staff signup code".to_string()),
                self,
            ));
        }
        self.sign_up_as(name, email, password).await
    }
}

impl<P: PortalKind> Portal<P, SignedOut> {
    fn signed_out(config: ClientConfig) -> Self {
        Self {
            accounts: AccountClient::new(&config),
            http: HttpClient::new(&config),
            config,
            state: SignedOut,
            _kind: PhantomData,
        }
    }

    /// Sign in to an existing account.
    ///
    /// On failure the portal comes back inside the error, ready for the
    /// next attempt. The staff portal refuses accounts whose role is
    /// `user` even when the credentials are right.
    pub async fn sign_in(
        self,
        email: &str,
        password: &str,
    ) -> Result<Portal<P, SignedIn>, (AppError, Self)> {
        if let Err(message) = check_credentials(email, password) {
            return Err((AppError::Validation(message), self));
        }
        let grant = match self.accounts.sign_in(email.trim(), password).await {
            Ok(grant) => grant,
            Err(e) => return Err((e.into(), self)),
        };

        let store = self.store_with_token(&grant.token);
        let account = load_account(store.as_ref(), &grant.uid, email.trim()).await;
        if !P::admits(account.role) {
            tracing::warn!(
                portal = P::NAME,
                uid = %grant.uid,
                role = %account.role,
                "Sign-in refused for this portal"
            );
            return Err((
                AppError::Unauthorized(format!(
                    "This account is not authorized for the {} portal",
                    P::NAME
                )),
                self,
            ));
        }

        let session = Session {
            uid: grant.uid,
            email: account.email,
            name: account.name,
            role: account.role,
            token: grant.token,
        };
        tracing::info!(portal = P::NAME, uid = %session.uid, role = %session.role, "Signed in");
        Ok(self.into_signed_in(session, store))
    }

    async fn sign_up_as(
        self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Portal<P, SignedIn>, (AppError, Self)> {
        if let Err(message) = validate_required_text(name, "name", MAX_NAME_LEN) {
            return Err((AppError::Validation(message), self));
        }
        if let Err(message) = check_credentials(email, password) {
            return Err((AppError::Validation(message), self));
        }
        let grant = match self.accounts.sign_up(email.trim(), password).await {
            Ok(grant) => grant,
            Err(e) => return Err((e.into(), self)),
        };

        let store = self.store_with_token(&grant.token);
        let account = UserAccount {
            id: grant.uid.clone(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            role: P::SIGNUP_ROLE,
        };
        // Best effort: the account exists even if this write fails, and a
        // missing record falls back to defaults on the next sign-in.
        match serde_json::to_value(&account) {
            Ok(record) => {
                if let Err(e) = store.put(USERS, &grant.uid, record).await {
                    tracing::warn!(uid = %grant.uid, error = %e, "Failed to write user record");
                }
            }
            Err(e) => tracing::warn!(uid = %grant.uid, error = %e, "Failed to encode user record"),
        }

        let session = Session {
            uid: grant.uid,
            email: account.email,
            name: account.name,
            role: account.role,
            token: grant.token,
        };
        tracing::info!(portal = P::NAME, uid = %session.uid, "Account created");
        Ok(self.into_signed_in(session, store))
    }

    fn store_with_token(&self, token: &str) -> Arc<dyn DocumentStore> {
        Arc::new(RestStore::with_http(self.http.clone().with_token(token)))
    }

    fn into_signed_in(self, session: Session, store: Arc<dyn DocumentStore>) -> Portal<P, SignedIn> {
        Portal {
            config: self.config,
            accounts: self.accounts,
            http: self.http,
            state: SignedIn { session, store },
            _kind: PhantomData,
        }
    }
}

impl<P: PortalKind> Portal<P, SignedIn> {
    /// The signed-in identity.
    pub fn session(&self) -> &Session {
        &self.state.session
    }

    /// Complaint operations over this session's store connection.
    pub fn complaints(&self) -> ComplaintService {
        ComplaintService::new(self.state.store.clone())
    }

    /// Directory operations over this session's store connection.
    pub fn directory(&self) -> Directory {
        Directory::new(self.state.store.clone())
    }

    /// Replace the carried session, e.g. after a rename.
    pub fn set_session(&mut self, session: Session) {
        self.state.session = session;
    }

    /// Sign out, returning to the login state.
    pub fn sign_out(self) -> Portal<P, SignedOut> {
        tracing::info!(portal = P::NAME, uid = %self.state.session.uid, "Signed out");
        Portal {
            config: self.config,
            accounts: self.accounts,
            http: self.http,
            state: SignedOut,
            _kind: PhantomData,
        }
    }
}

/// Local credential checks shared by sign-up and sign-in.
fn check_credentials(email: &str, password: &str) -> Result<(), String> {
    if !looks_like_email(email.trim()) {
        return Err("Enter a valid email address".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Read the user record after a grant. A missing or unreadable record falls
/// back to role `user` with the email's local part as display name.
async fn load_account(store: &dyn DocumentStore, uid: &str, email: &str) -> UserAccount {
    let fallback = || UserAccount {
        id: uid.to_string(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        role: Role::User,
    };
    match store.get(USERS, uid).await {
        Ok(Some(doc)) => match doc.parse::<UserAccount>() {
            Ok(mut account) => {
                account.id = uid.to_string();
                account
            }
            Err(e) => {
                tracing::warn!(uid = %uid, error = %e, "Malformed user record, using defaults");
                fallback()
            }
        },
        Ok(None) => {
            tracing::debug!(uid = %uid, "No user record, using defaults");
            fallback()
        }
        Err(e) => {
            tracing::warn!(uid = %uid, error = %e, "Failed to read user record, using defaults");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Local rejections happen before any network call, so these tests point
    // the portal at an address nothing listens on.
    fn config() -> ClientConfig {
        ClientConfig::new("http://127.0.0.1:9")
            .with_timeout(1)
            .with_staff_signup_code("CODE-1")
    }

    #[tokio::test]
    async fn wrong_staff_code_is_rejected_locally() {
        let portal = Portal::staff(config());
        let (err, portal) = portal
            .sign_up("Sol", "sol@example.com", "hunter22", "WRONG")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // The portal comes back usable for the next attempt.
        let (err, _portal) = portal
            .sign_up("Sol", "sol@example.com", "hunter22", "still wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_locally() {
        let portal = Portal::user(config());
        let (err, portal) = portal.sign_in("not-an-email", "hunter22").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let (err, _portal) = portal
            .sign_up("Uma", "dot@nowhere", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn short_password_and_blank_name_are_rejected_locally() {
        let portal = Portal::user(config());
        let (err, portal) = portal
            .sign_up("Uma", "uma@example.com", "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let (err, _portal) = portal
            .sign_up("   ", "uma@example.com", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

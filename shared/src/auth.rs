//! Account-service types shared between client and server
//!
//! Request/response DTOs plus the fixed failure vocabulary the service
//! speaks. The vocabulary words travel in the response envelope's `code`
//! field.

use serde::{Deserialize, Serialize};

/// Sign-up / sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful sign-up / sign-in payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Account id; doubles as the `users` document key.
    pub uid: String,
    /// Opaque bearer token for store access.
    pub token: String,
}

/// Account-service failure vocabulary.
///
/// Sign-up failures: `EMAIL_EXISTS`, `WEAK_PASSWORD`, `INVALID_EMAIL`.
/// Sign-in failures: `NOT_FOUND`, `WRONG_PASSWORD`, `DISABLED`,
/// `TOO_MANY_ATTEMPTS`. Anything else is carried through in `Other` so it
/// can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCode {
    EmailExists,
    WeakPassword,
    InvalidEmail,
    NotFound,
    WrongPassword,
    Disabled,
    TooManyAttempts,
    Other(String),
}

impl AuthCode {
    /// Parse a wire code. Unknown codes land in `Other`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "EMAIL_EXISTS" => AuthCode::EmailExists,
            "WEAK_PASSWORD" => AuthCode::WeakPassword,
            "INVALID_EMAIL" => AuthCode::InvalidEmail,
            "NOT_FOUND" => AuthCode::NotFound,
            "WRONG_PASSWORD" => AuthCode::WrongPassword,
            "DISABLED" => AuthCode::Disabled,
            "TOO_MANY_ATTEMPTS" => AuthCode::TooManyAttempts,
            other => AuthCode::Other(other.to_string()),
        }
    }

    /// Wire representation.
    pub fn code(&self) -> &str {
        match self {
            AuthCode::EmailExists => "EMAIL_EXISTS",
            AuthCode::WeakPassword => "WEAK_PASSWORD",
            AuthCode::InvalidEmail => "INVALID_EMAIL",
            AuthCode::NotFound => "NOT_FOUND",
            AuthCode::WrongPassword => "WRONG_PASSWORD",
            AuthCode::Disabled => "DISABLED",
            AuthCode::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AuthCode::Other(code) => code,
        }
    }

    /// User-facing message. Unmapped codes echo the raw code in title case.
    pub fn message(&self) -> String {
        match self {
            AuthCode::EmailExists => {
                "An account with this email already exists. Try logging in.".to_string()
            }
            AuthCode::WeakPassword => {
                "Password is too weak. Use at least 6 characters.".to_string()
            }
            AuthCode::InvalidEmail => "Invalid email address format.".to_string(),
            AuthCode::NotFound => "No account found with this email. Please sign up.".to_string(),
            AuthCode::WrongPassword => "Incorrect password. Please try again.".to_string(),
            AuthCode::Disabled => "This account has been disabled. Contact support.".to_string(),
            AuthCode::TooManyAttempts => "Too many attempts. Try again later.".to_string(),
            AuthCode::Other(code) => format!("Server error: {}", title_case(code)),
        }
    }
}

impl std::fmt::Display for AuthCode {
    // Display is the user-facing message; the raw word stays in `code()`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// `SOME_RAW_CODE` -> `Some Raw Code`.
fn title_case(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//! Input validation helpers
//!
//! Centralized text limits and field checks. Everything here runs locally,
//! before any network call; helpers return the rejection message so callers
//! can wrap it in their own error type.

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: complaint titles, account display names, categories.
pub const MAX_NAME_LEN: usize = 200;

/// Long free text: descriptions, remarks, locations, contacts.
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321).
pub const MAX_EMAIL_LEN: usize = 254;

/// Minimum password length accepted locally and enforced by the service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum password length (before hashing, service-side).
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ───────────────────────────────────────────────

/// Validate that a required string is non-empty after trimming and within
/// the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ));
    }
    Ok(())
}

/// Minimal email shape check: an `@` with a dot somewhere in the domain
/// part. Real validation is the account service's job.
pub fn looks_like_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

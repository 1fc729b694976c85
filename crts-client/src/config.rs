//! Client configuration

use serde::Deserialize;

/// Staff signup code used when the environment does not override it.
pub const DEFAULT_STAFF_SIGNUP_CODE: &str = "CRTS-FACULTY-999";

/// Connection settings for the backend.
///
/// # Environment variables
///
/// [`ClientConfig::from_env`] reads:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `CRTS_BASE_URL` | `http://localhost:8080` | Backend base URL |
/// | `CRTS_TIMEOUT_SECS` | `30` | Request timeout in seconds |
/// | `CRTS_STAFF_SIGNUP_CODE` | `CRTS-FACULTY-999` | Shared code gating staff self-signup |
/// | `CRTS_CREDENTIALS_FILE` | unset | Path to a JSON file carrying the service API key |
///
/// The credentials file holds `{"api_key": "..."}`. An unreadable or
/// malformed file is logged and treated as absent.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing path.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Bearer token for store requests, once a sign-in has produced one.
    pub token: Option<String>,
    /// Service API key appended to account service calls.
    pub api_key: Option<String>,
    /// Shared code gating staff self-signup.
    pub staff_signup_code: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            token: None,
            api_key: None,
            staff_signup_code: DEFAULT_STAFF_SIGNUP_CODE.to_string(),
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_staff_signup_code(mut self, code: impl Into<String>) -> Self {
        self.staff_signup_code = code.into();
        self
    }

    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CRTS_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
        );
        if let Ok(raw) = std::env::var("CRTS_TIMEOUT_SECS")
            && let Ok(timeout) = raw.parse()
        {
            config.timeout = timeout;
        }
        if let Ok(code) = std::env::var("CRTS_STAFF_SIGNUP_CODE") {
            config.staff_signup_code = code;
        }
        if let Ok(path) = std::env::var("CRTS_CREDENTIALS_FILE") {
            config.api_key = load_api_key(&path);
        }
        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    api_key: String,
}

fn load_api_key(path: &str) -> Option<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to read credentials file");
            return None;
        }
    };
    match serde_json::from_str::<CredentialsFile>(&raw) {
        Ok(credentials) => Some(credentials.api_key),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Malformed credentials file");
            None
        }
    }
}

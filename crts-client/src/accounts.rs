//! Account service client

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use shared::auth::{AuthCode, Credentials, TokenGrant};
use shared::response::ApiResponse;

/// Client for the sign-up / sign-in endpoints of the backend.
///
/// Successful calls return a [`TokenGrant`]; failures carry the service's
/// auth vocabulary as [`ClientError::Auth`], ready to show to the user.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: HttpClient,
    api_key: Option<String>,
}

impl AccountClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
            api_key: config.api_key.clone(),
        }
    }

    /// Create an account for the given credentials.
    pub async fn sign_up(&self, email: &str, password: &str) -> ClientResult<TokenGrant> {
        tracing::debug!(email = %email, "Signing up");
        self.send("auth/sign_up", email, password).await
    }

    /// Sign in to an existing account.
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<TokenGrant> {
        tracing::debug!(email = %email, "Signing in");
        self.send("auth/sign_in", email, password).await
    }

    async fn send(&self, path: &str, email: &str, password: &str) -> ClientResult<TokenGrant> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let mut query = Vec::new();
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }

        let response = self.http.post_raw(path, &query, &credentials).await?;
        if response.status().is_success() {
            let envelope: ApiResponse<TokenGrant> = response.json().await?;
            return envelope
                .data
                .ok_or_else(|| ClientError::InvalidResponse("Missing token grant".to_string()));
        }

        // Failure envelopes carry the vocabulary word in `code`.
        let text = response.text().await?;
        match serde_json::from_str::<ApiResponse<()>>(&text) {
            Ok(envelope) => Err(ClientError::Auth(AuthCode::from_code(&envelope.code))),
            Err(_) => Err(ClientError::Internal(text)),
        }
    }
}

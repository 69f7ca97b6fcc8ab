//! Authentication backend client.
//!
//! The console backend owns credentials and token lifecycles; this client
//! only speaks the three session endpoints and maps transport outcomes to
//! typed errors. Tokens are opaque strings here, validation happens server
//! side.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SessionConfig;

/// Error returned by backend calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Transport failure (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but the body was not what we expect.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend refused the request. Displays as the backend's own
    /// message so login surfaces read exactly what the server said.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Untrusted user record as the backend sends it.
///
/// Every field is optional; [`crate::normalize::normalize_principal`] is
/// the single place defaults are applied. `id` stays a raw JSON value
/// because some backends send numeric account ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub admin_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub insurance_company_id: Option<String>,
    #[serde(default)]
    pub corporate_client_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<Value>,
    #[serde(default)]
    pub permissions: Option<Value>,
}

/// Successful `POST /auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReply {
    pub access_token: String,
    pub user: RawUser,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// The three backend calls the session makes.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/login` with a username/password pair.
    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, BackendError>;

    /// `GET /api/auth/validate` with a bearer token. `Ok` means the token
    /// is still good.
    async fn validate_token(&self, token: &str) -> Result<(), BackendError>;

    /// `POST /api/auth/logout` with a bearer token. Callers treat failure
    /// as non-blocking.
    async fn logout(&self, token: &str) -> Result<(), BackendError>;
}

/// HTTP implementation of [`AuthBackend`].
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAuthBackend {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            timeout: config.request_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, username: &str, password: &str) -> Result<LoginReply, BackendError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .timeout(self.timeout)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Authentication failed".to_string());
            tracing::debug!(status = status.as_u16(), "login rejected by backend");
            return Err(BackendError::Rejected { status: status.as_u16(), message });
        }

        let reply = response
            .json::<LoginReply>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        tracing::debug!(
            token_preview = %token_preview(&reply.access_token),
            "login accepted"
        );
        Ok(reply)
    }

    async fn validate_token(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.url("/api/auth/validate"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Rejected {
                status: status.as_u16(),
                message: "Token validation failed".to_string(),
            })
        }
    }

    async fn logout(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Rejected {
                status: status.as_u16(),
                message: "Logout rejected".to_string(),
            })
        }
    }
}

/// First few characters of a token, for logs. Never log the whole thing.
pub(crate) fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(15).collect();
    if token.len() > head.len() { format!("{head}...") } else { head }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_user_tolerates_sparse_payloads() {
        let raw: RawUser = serde_json::from_str(r#"{"username": "casey"}"#).unwrap();
        assert_eq!(raw.username.as_deref(), Some("casey"));
        assert!(raw.id.is_none());
        assert!(raw.roles.is_empty());
        assert!(raw.permissions.is_none());
    }

    #[test]
    fn raw_user_accepts_numeric_ids() {
        let raw: RawUser = serde_json::from_str(r#"{"id": 42, "userType": "member"}"#).unwrap();
        assert_eq!(raw.id, Some(Value::from(42)));
        assert_eq!(raw.user_type.as_deref(), Some("member"));
    }

    #[test]
    fn login_reply_uses_the_wire_field_names() {
        let reply: LoginReply = serde_json::from_str(
            r#"{"access_token": "jwt-abc", "user": {"username": "casey"}}"#,
        )
        .unwrap();
        assert_eq!(reply.access_token, "jwt-abc");
    }

    #[test]
    fn rejected_error_displays_the_backend_message() {
        let err = BackendError::Rejected { status: 401, message: "Invalid credentials".into() };
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn token_previews_are_truncated() {
        assert_eq!(token_preview("abc"), "abc");
        let long = "0123456789abcdef0123";
        assert_eq!(token_preview(long), "0123456789abcde...");
    }
}

/// Session resolution against the external auth provider.
///
/// ARCHITECTURAL RULE: the provider owns credentials, token minting, and
/// session storage. This module only resolves bearer tokens into role-scoped
/// sessions; no password or token material is ever stored here.
use axum::http::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::errors::AppError;

pub mod extract;

const SESSION_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session not found or expired")]
    InvalidSession,

    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidSession => AppError::Unauthorized,
            other => AppError::AuthProvider(other.to_string()),
        }
    }
}

/// Portal role attached to a provider session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Client,
    Management,
}

/// A resolved provider session. `external_id` is the provider's account id,
/// matched against the portal user tables.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub external_id: String,
    pub email: String,
    pub role: Role,
}

/// The single client used for all auth provider calls.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(SESSION_LOOKUP_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    /// Resolves a bearer token into a session via the provider's session API.
    /// 401/404 from the provider mean the token is invalid or expired.
    pub async fn lookup(&self, token: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .get(format!("{}/v1/sessions/{}", self.api_url, token))
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 404 {
            return Err(AuthError::InvalidSession);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Extracts the bearer token from an Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with_auth("Bearer tok_abc123");
        assert_eq!(bearer_token(&headers), Some("tok_abc123"));
    }

    #[test]
    fn test_bearer_token_trims_whitespace() {
        let headers = headers_with_auth("Bearer   tok_abc123  ");
        assert_eq!(bearer_token(&headers), Some("tok_abc123"));
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme_is_none() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_token_is_none() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let session: AuthSession = serde_json::from_str(
            r#"{"external_id": "ext_1", "email": "a@b.co", "role": "management"}"#,
        )
        .unwrap();
        assert_eq!(session.role, Role::Management);
    }
}

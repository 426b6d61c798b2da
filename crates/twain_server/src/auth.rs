//! Bearer credential verification.

use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use twain_error::{AuthError, AuthErrorKind};

/// Default identity service endpoint.
pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// The caller a credential belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    /// Stable user id
    pub uid: String,
    /// Email, when the identity service knows it
    pub email: Option<String>,
}

/// Checks a bearer credential against an identity service.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a token to its user, or reject it.
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::new(AuthErrorKind::MissingCredential))
}

/// Verifier backed by a fixed token table.
///
/// Used for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Accept exactly these `token -> uid` pairs.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Accept one token.
    pub fn single(token: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::new(HashMap::from([(token.into(), uid.into())]))
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        self.tokens
            .get(token)
            .map(|uid| VerifiedUser {
                uid: uid.clone(),
                email: None,
            })
            .ok_or_else(|| AuthError::new(AuthErrorKind::Rejected("unknown token".to_string())))
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifier that asks the Firebase identity service to resolve ID tokens.
#[derive(Debug, Clone)]
pub struct FirebaseIdentityVerifier {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl FirebaseIdentityVerifier {
    /// Create a verifier for the project owning `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, IDENTITY_TOOLKIT_URL)
    }

    /// Create a verifier against another endpoint, such as the auth emulator.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    #[instrument(skip_all)]
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let url = format!("{}/accounts:lookup", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Verifier(e.to_string())))?;

        let status = response.status();
        if status.as_u16() == 400 {
            let body = response.text().await.unwrap_or_default();
            warn!("Identity service rejected token");
            return Err(AuthError::new(AuthErrorKind::Rejected(
                body.chars().take(200).collect(),
            )));
        }
        if !status.is_success() {
            return Err(AuthError::new(AuthErrorKind::Verifier(format!(
                "HTTP {}",
                status
            ))));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Verifier(e.to_string())))?;
        let user = lookup.users.into_iter().next().ok_or_else(|| {
            AuthError::new(AuthErrorKind::Rejected("no user for token".to_string()))
        })?;
        debug!(uid = %user.local_id, "Token verified");
        Ok(VerifiedUser {
            uid: user.local_id,
            email: user.email,
        })
    }
}

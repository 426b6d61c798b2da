//! The signed-in user and their credential.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};
use twain_error::{AuthError, AuthErrorKind};

/// Something that can hand out a bearer token for the current user.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token, minting a new one first when `force_refresh` is set.
    async fn token(&self, force_refresh: bool) -> Result<String, AuthError>;
}

/// A token that never changes, for service accounts and tests.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    /// Always hand out `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self, _force_refresh: bool) -> Result<String, AuthError> {
        if self.token.is_empty() {
            return Err(AuthError::new(AuthErrorKind::TokenRefreshFailed(
                "no token configured".to_string(),
            )));
        }
        Ok(self.token.clone())
    }
}

/// Authenticated user context, passed explicitly to the dashboard.
#[derive(Clone)]
pub struct AuthSession {
    user_id: String,
    source: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    /// Session for `user_id` backed by `source`.
    pub fn new(user_id: impl Into<String>, source: Arc<dyn TokenSource>) -> Self {
        Self {
            user_id: user_id.into(),
            source,
        }
    }

    /// Stable id of the signed-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Fetch a bearer token.
    ///
    /// Every failure is reported as `TokenRefreshFailed`.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn get_token(&self, force_refresh: bool) -> Result<String, AuthError> {
        match self.source.token(force_refresh).await {
            Ok(token) => {
                debug!("Token obtained");
                Ok(token)
            }
            Err(e) => match e.kind {
                AuthErrorKind::TokenRefreshFailed(_) => Err(e),
                other => Err(AuthError::new(AuthErrorKind::TokenRefreshFailed(
                    other.to_string(),
                ))),
            },
        }
    }
}

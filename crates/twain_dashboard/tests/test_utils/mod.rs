//! Test utilities for twain_dashboard tests.
#![allow(dead_code)]

pub mod scripted_store;

pub use scripted_store::ScriptedStore;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use twain_core::{Difficulty, NewQuestionGroup, NewQuestionGroupBuilder, QuestionGroup, Theme};
use twain_dashboard::{
    AuthSession, Dashboard, DashboardView, GenerationClient, RetryPolicy, StaticTokenSource,
    TokenSource,
};
use twain_error::{AuthError, AuthErrorKind};
use twain_store::QuestionGroupStore;

pub const USER_ID: &str = "curator-1";

/// Token source whose refresh always fails.
pub struct FailingTokenSource;

#[async_trait]
impl TokenSource for FailingTokenSource {
    async fn token(&self, _force_refresh: bool) -> Result<String, AuthError> {
        Err(AuthError::new(AuthErrorKind::Verifier(
            "identity service unreachable".to_string(),
        )))
    }
}

pub fn group(title: &str, order: i64) -> NewQuestionGroup {
    NewQuestionGroupBuilder::default()
        .title(title)
        .questions((1..=5).map(|i| format!("{title} {i}?")).collect::<Vec<_>>())
        .theme(Theme::Playful)
        .difficulty(Difficulty::Light)
        .caption("caption")
        .order(order)
        .build()
        .expect("valid group")
}

pub fn titles(groups: &[QuestionGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.title.as_str()).collect()
}

/// Millisecond backoff so retry tests finish quickly.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(5),
    }
}

pub fn session() -> AuthSession {
    AuthSession::new(USER_ID, Arc::new(StaticTokenSource::new("token")))
}

pub fn dashboard(store: Arc<dyn QuestionGroupStore>, session: AuthSession) -> Dashboard {
    let client = GenerationClient::new("http://127.0.0.1:9").expect("client");
    Dashboard::new(store, session, client, fast_policy())
}

/// Wait until the published view satisfies the predicate.
pub async fn wait_for_view(
    rx: &mut watch::Receiver<DashboardView>,
    predicate: impl FnMut(&DashboardView) -> bool,
) -> anyhow::Result<DashboardView> {
    let view = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate)).await??;
    Ok(view.clone())
}

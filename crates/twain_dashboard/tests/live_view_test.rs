mod test_utils;

use std::sync::Arc;
use test_utils::{FailingTokenSource, ScriptedStore, USER_ID, dashboard, group, session, titles, wait_for_view};
use twain_dashboard::{
    AUTH_ERROR_MESSAGE, AuthSession, ConnectionState, RETRIES_EXHAUSTED_MESSAGE,
    TOKEN_FAILURE_MESSAGE,
};
use twain_error::StoreErrorKind;
use twain_store::{InMemoryStore, QuestionGroupStore};

fn unavailable() -> StoreErrorKind {
    StoreErrorKind::Unavailable("backend offline".to_string())
}

#[tokio::test]
async fn test_connect_goes_live_and_follows_mutations() -> anyhow::Result<()> {
    let inner = InMemoryStore::new();
    inner.create(group("first", 0)).await?;
    let dashboard = dashboard(Arc::new(inner.clone()), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state == ConnectionState::Live).await?;
    assert_eq!(titles(&view.groups), vec!["first"]);

    inner.create(group("second", 1)).await?;
    let view = wait_for_view(&mut rx, |v| v.groups.len() == 2).await?;
    assert_eq!(titles(&view.groups), vec!["first", "second"]);
    Ok(())
}

#[tokio::test]
async fn test_unavailable_feed_gives_up_after_three_retries() -> anyhow::Result<()> {
    let store = Arc::new(
        ScriptedStore::new(InMemoryStore::new()).fail_subscribes(vec![unavailable(); 4]),
    );
    let dashboard = dashboard(store.clone(), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state.is_errored()).await?;
    assert_eq!(
        view.state,
        ConnectionState::Errored(RETRIES_EXHAUSTED_MESSAGE.to_string())
    );
    // The first attempt plus three retries.
    assert_eq!(store.subscribe_calls(), 4);
    Ok(())
}

#[tokio::test]
async fn test_retry_that_succeeds_goes_live() -> anyhow::Result<()> {
    let inner = InMemoryStore::new();
    inner.create(group("kept", 0)).await?;
    let store = Arc::new(ScriptedStore::new(inner).fail_subscribes(vec![
        StoreErrorKind::DeadlineExceeded("slow".to_string()),
    ]));
    let dashboard = dashboard(store.clone(), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state == ConnectionState::Live).await?;
    assert_eq!(titles(&view.groups), vec!["kept"]);
    assert_eq!(store.subscribe_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_permission_denied_is_not_retried() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::new(InMemoryStore::new()).fail_subscribes(vec![
        StoreErrorKind::PermissionDenied("Missing or insufficient permissions.".to_string()),
    ]));
    let dashboard = dashboard(store.clone(), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state.is_errored()).await?;
    assert_eq!(view.state, ConnectionState::Errored(AUTH_ERROR_MESSAGE.to_string()));
    assert_eq!(store.subscribe_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_other_errors_surface_their_message() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::new(InMemoryStore::new()).fail_subscribes(vec![
        StoreErrorKind::Backend("index missing".to_string()),
    ]));
    let dashboard = dashboard(store.clone(), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state.is_errored()).await?;
    assert_eq!(
        view.state,
        ConnectionState::Errored("Connection error: index missing".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_token_failure_stops_before_subscribing() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::new(InMemoryStore::new()));
    let session = AuthSession::new(USER_ID, Arc::new(FailingTokenSource));
    let dashboard = dashboard(store.clone(), session);
    let mut rx = dashboard.watch();

    dashboard.connect();
    let view = wait_for_view(&mut rx, |v| v.state.is_errored()).await?;
    assert_eq!(view.state, ConnectionState::Errored(TOKEN_FAILURE_MESSAGE.to_string()));
    assert_eq!(store.subscribe_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_retry_action_reconnects_with_fresh_budget() -> anyhow::Result<()> {
    let store = Arc::new(
        ScriptedStore::new(InMemoryStore::new()).fail_subscribes(vec![unavailable(); 4]),
    );
    let dashboard = dashboard(store.clone(), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    wait_for_view(&mut rx, |v| v.state.is_errored()).await?;

    dashboard.retry();
    wait_for_view(&mut rx, |v| v.state == ConnectionState::Live).await?;
    assert_eq!(store.subscribe_calls(), 5);
    Ok(())
}

#[tokio::test]
async fn test_disconnect_returns_to_idle() -> anyhow::Result<()> {
    let dashboard = dashboard(Arc::new(InMemoryStore::new()), session());
    let mut rx = dashboard.watch();

    dashboard.connect();
    wait_for_view(&mut rx, |v| v.state == ConnectionState::Live).await?;
    dashboard.disconnect();
    assert_eq!(dashboard.view().state, ConnectionState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_write_probe_records_user() -> anyhow::Result<()> {
    let inner = InMemoryStore::new();
    let dashboard = dashboard(Arc::new(inner.clone()), session());

    dashboard.test_write().await?;
    let probes = inner.probes().await;
    assert_eq!(probes.len(), 1);
    assert_eq!(probes[0].user_id, USER_ID);
    assert!(probes[0].test);
    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_group_is_a_no_op() -> anyhow::Result<()> {
    let store = InMemoryStore::new();
    let dashboard = dashboard(Arc::new(store.clone()), session());
    dashboard.delete("missing").await?;
    assert!(store.list_ordered().await?.is_empty());
    Ok(())
}

mod test_utils;

use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{group, session};
use twain_dashboard::{Dashboard, GenerationClient, RetryPolicy};
use twain_error::TwainErrorKind;
use twain_store::InMemoryStore;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer token")
}

async fn generate_one(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Unauthorized: no token" })),
        );
    }
    let created = group("served", 4).with_id("g-1");
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "ok", "questionGroup": created })),
    )
}

async fn generate_batch(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "success": false })));
    }
    let count = body["count"].as_u64().unwrap_or(0);
    let groups: Vec<_> = (0..count)
        .map(|i| group("batch", i as i64).with_id(format!("b-{i}")))
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "questionGroups": groups })),
    )
}

async fn failing() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": "Failed to generate questions" })),
    )
}

async fn spawn_service(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn dashboard_for(endpoint: &str) -> anyhow::Result<Dashboard> {
    Ok(Dashboard::new(
        Arc::new(InMemoryStore::new()),
        session(),
        GenerationClient::new(endpoint)?,
        RetryPolicy::default(),
    ))
}

#[tokio::test]
async fn test_generate_sends_bearer_and_parses_group() -> anyhow::Result<()> {
    let endpoint = spawn_service(
        Router::new()
            .route("/generateQuestionGroup", post(generate_one))
            .route("/generateBatchQuestions", post(generate_batch)),
    )
    .await?;
    let dashboard = dashboard_for(&endpoint)?;

    let created = dashboard.generate().await?;
    assert_eq!(created.id, "g-1");
    assert_eq!(created.order, 4);

    let batch = dashboard.generate_batch(3).await?;
    assert_eq!(batch.len(), 3);
    assert_eq!(batch[2].id, "b-2");
    Ok(())
}

#[tokio::test]
async fn test_service_failure_carries_status_and_message() -> anyhow::Result<()> {
    let endpoint =
        spawn_service(Router::new().route("/generateQuestionGroup", post(failing))).await?;
    let dashboard = dashboard_for(&format!("{endpoint}/"))?;

    let err = dashboard.generate().await.unwrap_err();
    match err.kind() {
        TwainErrorKind::Http(http) => {
            assert_eq!(http.status, Some(500));
            assert_eq!(http.message, "Failed to generate questions");
        }
        other => panic!("unexpected error {other}"),
    }
    Ok(())
}

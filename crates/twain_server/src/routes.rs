//! HTTP endpoints.

use crate::{AppState, GenerationStage, VerifiedUser, bearer_token, pipeline::enter};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument, warn};
use twain_error::TwainErrorKind;

/// Batch size when the request body does not name one.
pub const DEFAULT_BATCH_COUNT: usize = 10;

/// Message returned when no usable questions came back.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate questions";

/// Body of a batch request.
#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    /// Number of groups to attempt
    pub count: Option<usize>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthCheck", get(health_check))
        .route("/testConfig", get(test_config))
        .route("/listVideos", get(list_videos))
        .route(
            "/generateQuestionGroup",
            post(generate_question_group).fallback(method_not_allowed),
        )
        .route(
            "/generateBatchQuestions",
            post(generate_batch_questions).fallback(method_not_allowed),
        )
        .route(
            "/processVideo",
            post(process_video).fallback(method_not_allowed),
        )
        .route(
            "/generateContent",
            post(generate_content).fallback(method_not_allowed),
        )
        .with_state(state)
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message.into() })),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Verify the caller before any generation work starts.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<VerifiedUser, Response> {
    enter(&GenerationStage::AuthPending);
    let verified = match bearer_token(headers) {
        Ok(token) => state.verifier.verify(token).await,
        Err(e) => Err(e),
    };
    match verified {
        Ok(user) => {
            enter(&GenerationStage::Authorized);
            Ok(user)
        }
        Err(e) => {
            warn!(error = %e.kind, "Rejected request");
            Err(failure(
                StatusCode::UNAUTHORIZED,
                format!("Unauthorized: {}", e.kind),
            ))
        }
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "message": "Twain API is running",
        "environment": state.info.environment,
    }))
}

async fn test_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "openai_api_key_set": state.info.openai_key_set,
        "firebase_storage_bucket_set": state.info.storage_bucket_set,
        "timestamp": timestamp(),
    }))
}

#[instrument(skip_all)]
async fn list_videos(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authenticate(&state, &headers).await {
        return rejection;
    }
    match state.catalog.list_videos().await {
        Ok(videos) => Json(json!({
            "success": true,
            "count": videos.len(),
            "videos": videos,
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "Video listing failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.kind.to_string())
        }
    }
}

#[instrument(skip_all)]
async fn generate_question_group(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };
    info!(uid = %user.uid, "Generating question group");

    match state.pipeline.generate_one(0).await {
        Ok(group) => Json(json!({
            "success": true,
            "message": "Question group generated successfully",
            "questionGroup": group,
            "timestamp": timestamp(),
        }))
        .into_response(),
        Err(e) => match e.kind() {
            TwainErrorKind::Generation(_) => {
                warn!(error = %e, "Question generation failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
            }
            TwainErrorKind::Store(store) => {
                error!(error = %e, "Store write failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, store.kind.to_string())
            }
            other => {
                error!(error = %e, "Generation request failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        },
    }
}

#[instrument(skip_all)]
async fn generate_batch_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<BatchRequest>>,
) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    let requested = body
        .and_then(|Json(request)| request.count)
        .unwrap_or(DEFAULT_BATCH_COUNT);
    let count = requested.min(state.info.max_batch_count);
    if count < requested {
        warn!(requested, count, "Batch count capped");
    }
    info!(uid = %user.uid, count, "Generating question group batch");

    let groups = state.pipeline.generate_batch(count).await;
    Json(json!({
        "success": true,
        "message": format!("Generated {} question groups", groups.len()),
        "questionGroups": groups,
        "timestamp": timestamp(),
    }))
    .into_response()
}

async fn process_video() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Video processing endpoint ready",
        "timestamp": timestamp(),
    }))
}

async fn generate_content() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Content generation endpoint ready",
        "timestamp": timestamp(),
    }))
}

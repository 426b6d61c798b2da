//! Test utilities for twain_server tests.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::{Arc, Mutex};
use twain_core::{NewQuestionGroup, QuestionGroup, VideoEntry};
use twain_error::{ModelError, ModelErrorKind, StoreError, StoreErrorKind};
use twain_models::{CaptionGenerator, ChatDriver, Message, ModelResult, QuestionGenerator};
use twain_server::{AppState, GenerationPipeline, ServiceInfo, StaticTokenVerifier, router};
use twain_store::{InMemoryStore, QuestionGroupStore, StaticVideoCatalog, StoreResult, Subscription};

/// Token accepted by [`TestApp`].
pub const TOKEN: &str = "test-token";

/// Chat driver that replays a script and counts calls.
#[derive(Clone)]
pub struct ScriptedDriver {
    script: Arc<Mutex<Vec<Result<String, ModelErrorKind>>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedDriver {
    /// Replies in order; exhausting the script is an error.
    pub fn new(script: Vec<Result<String, ModelErrorKind>>) -> Self {
        let mut script = script;
        script.reverse();
        Self {
            script: Arc::new(Mutex::new(script)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatDriver for ScriptedDriver {
    async fn complete(&self, _messages: &[Message]) -> ModelResult<String> {
        *self.calls.lock().unwrap() += 1;
        let next = self.script.lock().unwrap().pop();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(kind)) => Err(ModelError::new(kind)),
            None => Err(ModelError::new(ModelErrorKind::Http(
                "script exhausted".to_string(),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// A well-formed five-question reply.
pub fn questions_reply(tag: &str) -> Result<String, ModelErrorKind> {
    Ok((1..=5)
        .map(|i| format!("{tag} question {i}?"))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// A caption reply.
pub fn caption_reply(tag: &str) -> Result<String, ModelErrorKind> {
    Ok(format!("{tag} caption #relationships #talktogether"))
}

/// Store whose reads fail while writes reach the wrapped in-memory store.
#[derive(Clone)]
pub struct UnreadableStore {
    inner: InMemoryStore,
}

impl UnreadableStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self { inner }
    }

    fn read_error() -> StoreError {
        StoreError::new(StoreErrorKind::Unavailable("reads disabled".to_string()))
    }
}

#[async_trait]
impl QuestionGroupStore for UnreadableStore {
    async fn create(&self, group: NewQuestionGroup) -> StoreResult<String> {
        self.inner.create(group).await
    }

    async fn list_ordered(&self) -> StoreResult<Vec<QuestionGroup>> {
        Err(Self::read_error())
    }

    async fn subscribe(&self) -> StoreResult<Subscription> {
        Err(Self::read_error())
    }

    async fn update_order(&self, id: &str, order: i64) -> StoreResult<()> {
        self.inner.update_order(id, order).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn write_probe(&self, user_id: &str) -> StoreResult<String> {
        self.inner.write_probe(user_id).await
    }
}

/// Router wired to in-memory services.
pub struct TestApp {
    pub router: Router,
    pub driver: ScriptedDriver,
    pub store: InMemoryStore,
}

impl TestApp {
    pub fn new(script: Vec<Result<String, ModelErrorKind>>) -> Self {
        Self::with_videos(script, Vec::new())
    }

    pub fn with_videos(script: Vec<Result<String, ModelErrorKind>>, videos: Vec<VideoEntry>) -> Self {
        let store = InMemoryStore::new();
        Self::build(script, videos, store.clone(), Arc::new(store))
    }

    /// App whose pipeline can write but never read back.
    pub fn with_unreadable_store(script: Vec<Result<String, ModelErrorKind>>) -> Self {
        let store = InMemoryStore::new();
        let unreadable = UnreadableStore::new(store.clone());
        Self::build(script, Vec::new(), store, Arc::new(unreadable))
    }

    fn build(
        script: Vec<Result<String, ModelErrorKind>>,
        videos: Vec<VideoEntry>,
        store: InMemoryStore,
        backend: Arc<dyn QuestionGroupStore>,
    ) -> Self {
        let driver = ScriptedDriver::new(script);
        let shared: Arc<dyn ChatDriver> = Arc::new(driver.clone());
        let pipeline = GenerationPipeline::new(
            backend,
            QuestionGenerator::new(shared.clone()),
            CaptionGenerator::new(shared),
        );
        let info = ServiceInfo {
            environment: "test".to_string(),
            max_batch_count: 5,
            openai_key_set: true,
            storage_bucket_set: false,
        };
        let state = AppState::new(
            pipeline,
            Arc::new(StaticTokenVerifier::single(TOKEN, "user-1")),
            Arc::new(StaticVideoCatalog::new(videos)),
            info,
        );
        Self {
            router: router(state),
            driver,
            store,
        }
    }
}

/// Send a request and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> anyhow::Result<(u16, serde_json::Value)> {
    use tower::ServiceExt;

    let response: Response<Body> = router.clone().oneshot(request).await?;
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

/// POST with the test bearer token.
pub fn authed_post(uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::post(uri).header("authorization", format!("Bearer {TOKEN}"));
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

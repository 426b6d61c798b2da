//! Scripted chat driver.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use twain_error::{ModelError, ModelErrorKind};
use twain_models::{ChatDriver, Message, ModelResult};

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(ModelErrorKind),
}

/// Chat driver that replays a fixed script and records every conversation.
///
/// Once the script is exhausted the last reply repeats.
#[derive(Clone)]
pub struct MockChatDriver {
    script: Vec<MockReply>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockChatDriver {
    /// Always answer with the given text.
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockReply::Text(text.into())])
    }

    /// Always fail with the given error.
    pub fn new_error(kind: ModelErrorKind) -> Self {
        Self::new_sequence(vec![MockReply::Error(kind)])
    }

    /// Replay the replies in order.
    pub fn new_sequence(script: Vec<MockReply>) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times `complete` was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Conversations received, in call order.
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatDriver for MockChatDriver {
    async fn complete(&self, messages: &[Message]) -> ModelResult<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.to_vec());
            calls.len() - 1
        };
        let reply = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or(MockReply::Error(ModelErrorKind::EmptyResponse));
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(kind) => Err(ModelError::new(kind)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

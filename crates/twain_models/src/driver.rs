//! The seam between the generators and a concrete chat provider.

use crate::Message;
use async_trait::async_trait;
use twain_error::ModelError;

/// Result alias for chat provider calls.
pub type ModelResult<T> = Result<T, ModelError>;

/// Anything that turns a conversation into a single text reply.
///
/// Implemented by [`crate::OpenAiClient`]; tests substitute scripted drivers.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Send the conversation and return the reply text.
    async fn complete(&self, messages: &[Message]) -> ModelResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

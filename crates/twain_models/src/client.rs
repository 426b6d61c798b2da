use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatConfig, ChatDriver, Message, ModelResult};
use tracing::instrument;
use twain_error::{ModelError, ModelErrorKind};

/// Client for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: ChatConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: ChatConfig) -> ModelResult<Self> {
        if config.api_key().is_none() {
            return Err(ModelError::new(ModelErrorKind::MissingApiKey));
        }
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::Http(e.to_string())))?;
        tracing::debug!("Creating chat client");
        Ok(Self { config, client })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> ModelResult<ChatCompletionResponse> {
        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let mut req = self.client.post(&url).json(request);
        if let Some(api_key) = self.config.api_key() {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ModelError::new(ModelErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Chat service returned error");
            return Err(ModelError::new(ModelErrorKind::Api {
                status_code: status.as_u16(),
                message: body.chars().take(500).collect(),
            }));
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            ModelError::new(ModelErrorKind::Deserialization(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        if let Some(usage) = &result.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion successful"
            );
        }
        Ok(result)
    }
}

#[async_trait::async_trait]
impl ChatDriver for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> ModelResult<String> {
        let request = ChatCompletionRequest::new(self.config.model().clone(), messages.to_vec());
        let response = self.chat_completion(&request).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| ModelError::new(ModelErrorKind::EmptyResponse))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}

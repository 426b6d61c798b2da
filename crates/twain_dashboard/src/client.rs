//! HTTP client for the generation endpoints.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, instrument};
use twain_core::QuestionGroup;
use twain_error::HttpError;

/// Generation requests wait on two model calls per group.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Envelope shared by both generation endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    question_group: Option<QuestionGroup>,
    #[serde(default)]
    question_groups: Option<Vec<QuestionGroup>>,
}

/// Calls `generateQuestionGroup` and `generateBatchQuestions`.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GenerationClient {
    /// Client for the service rooted at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Service root.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Generate one group.
    #[instrument(skip(self, token), fields(endpoint = %self.endpoint))]
    pub async fn generate(&self, token: &str) -> Result<QuestionGroup, HttpError> {
        let response = self
            .post("generateQuestionGroup", token, json!({}))
            .await?;
        response
            .question_group
            .ok_or_else(|| HttpError::new("Response carried no question group"))
    }

    /// Generate up to `count` groups.
    #[instrument(skip(self, token), fields(endpoint = %self.endpoint))]
    pub async fn generate_batch(
        &self,
        token: &str,
        count: usize,
    ) -> Result<Vec<QuestionGroup>, HttpError> {
        let response = self
            .post("generateBatchQuestions", token, json!({ "count": count }))
            .await?;
        Ok(response.question_groups.unwrap_or_default())
    }

    async fn post(
        &self,
        route: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Result<GenerationResponse, HttpError> {
        let url = format!("{}/{}", self.endpoint, route);
        debug!(url = %url, "Calling generation endpoint");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let parsed: Result<GenerationResponse, _> = response.json().await;
        match parsed {
            Ok(body) if status.is_success() && body.success => Ok(body),
            Ok(body) => {
                let message = body
                    .error
                    .unwrap_or_else(|| format!("Generation endpoint returned {}", status));
                error!(status = %status, message = %message, "Generation endpoint reported failure");
                Err(HttpError::status(status.as_u16(), message))
            }
            Err(e) => Err(HttpError::status(
                status.as_u16(),
                format!("Failed to parse response: {}", e),
            )),
        }
    }
}

//! OpenAI-compatible client implementation.

use super::config::OpenAIConfig;
use super::convert::{self, ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use vestiary_core::{
    DescribeRequest, DescribeResponse, DescriptionService, Result, VestiaryError,
};

/// Client for OpenAI-style chat completion endpoints with vision input.
///
/// # Example
///
/// ```rust,ignore
/// use vestiary_model::openai::{OpenAIClient, OpenAIConfig};
///
/// let client = OpenAIClient::new(OpenAIConfig::new(
///     std::env::var("OPENAI_API_KEY").unwrap()
/// ))?;
/// ```
#[derive(Debug)]
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Create a new client. A single attempt is made per request; failures
    /// are surfaced, not retried.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(VestiaryError::Config("API key must not be empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VestiaryError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create a client for any OpenAI-compatible endpoint.
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        Self::new(OpenAIConfig::new(api_key).with_base_url(base_url).with_model(model))
    }

    /// Build the API URL for chat completions.
    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.effective_base_url().trim_end_matches('/'))
    }

    /// Build a chat completion request body from a describe request.
    fn build_request(&self, request: &DescribeRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: convert::request_to_messages(request),
            temperature: self.config.temperature,
            max_tokens: Some(self.config.max_tokens),
        }
    }
}

#[async_trait]
impl DescriptionService for OpenAIClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn describe(&self, request: DescribeRequest) -> Result<DescribeResponse> {
        let body = self.build_request(&request);
        debug!(
            model = %self.config.model,
            images = request.images.len(),
            "submitting description request"
        );

        let mut http_request = self
            .client
            .post(self.api_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");
        if let Some(organization_id) = &self.config.organization_id {
            http_request = http_request.header("OpenAI-Organization", organization_id);
        }

        let response = http_request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                VestiaryError::Service(format!(
                    "request timed out after {}s",
                    self.config.timeout_secs
                ))
            } else {
                VestiaryError::Service(format!("API request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VestiaryError::Service(format!("API error ({status}): {error_text}")));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| VestiaryError::Service(format!("failed to parse response: {e}")))?;

        convert::response_to_describe(chat_response)
    }
}

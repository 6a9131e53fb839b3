//! Configuration types for OpenAI-compatible endpoints.

use serde::{Deserialize, Serialize};

/// Default API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default vision-capable model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default cap on response tokens; descriptions are one or two sentences.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default per-request timeout in seconds. A hung call would otherwise
/// stall the whole batch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for an OpenAI-compatible description endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Optional custom base URL for compatible providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional organization ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Maximum tokens for the response.
    pub max_tokens: u32,
    /// Optional sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            organization_id: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Create a config with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Default::default() }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the organization ID.
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Set max tokens for the response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Get the effective base URL.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE)
    }
}

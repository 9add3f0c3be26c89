//! Anthropic Provider Implementation
//!
//! Sends prompts to the Anthropic messages API.
//!
//! # Features
//!
//! - Async HTTP communication with the messages endpoint
//! - Explicit configuration record (endpoint, key, model, token budget, timeout)
//! - No internal retries: a failed request is reported to the caller as-is
//!
//! # Examples
//!
//! ```no_run
//! use devglossary_llm::{AnthropicConfig, AnthropicProvider};
//!
//! let config = AnthropicConfig::with_key("sk-ant-...");
//! let provider = AnthropicProvider::new(config).expect("client");
//! ```

use async_trait::async_trait;
use devglossary_domain::{InferenceError, LlmProvider, Prompt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default messages API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";

/// API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default token budget per reply
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default timeout for a single request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Messages endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent as `x-api-key`
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens in a reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AnthropicConfig {
    /// Default settings with the given API key
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is not configured".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Anthropic messages API provider
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: reqwest::Client,
}

/// Request body for the messages API
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the messages API
#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(config: AnthropicConfig) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Communication(format!("failed to build client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Access the provider configuration
    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: &prompt.system,
            messages: vec![Message {
                role: "user",
                content: &prompt.user,
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError> {
        debug!(
            "POST {} (model {}, {} chars)",
            self.config.endpoint,
            self.config.model,
            prompt.user.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", self.config.api_key.trim())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn map_transport_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Communication(format!("Request failed: {}", e))
    }
}

/// The first text block carries the model's answer
fn first_text(response: MessagesResponse) -> Result<String, InferenceError> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| InferenceError::InvalidResponse("response missing text content".to_string()))
}

//! DevGlossary LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `devglossary-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic scripted provider for testing
//! - `AnthropicProvider`: Anthropic messages API integration
//!
//! # Examples
//!
//! ```
//! use devglossary_llm::MockProvider;
//! use devglossary_domain::{LlmProvider, Prompt};
//!
//! # async fn example() {
//! let provider = MockProvider::new("[]");
//! let prompt = Prompt { system: "sys".into(), user: "docs".into() };
//! assert_eq!(provider.complete(&prompt).await.unwrap(), "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod anthropic;

use async_trait::async_trait;
use devglossary_domain::{InferenceError, LlmProvider, Prompt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

pub use anthropic::{AnthropicConfig, AnthropicProvider};

/// Mock LLM provider for deterministic testing
///
/// Scripted replies are consumed in call order; once the script is exhausted
/// every call returns the default response. No network calls are made.
///
/// # Examples
///
/// ```
/// use devglossary_llm::MockProvider;
/// use devglossary_domain::{InferenceError, LlmProvider, Prompt};
///
/// # async fn example() {
/// let provider = MockProvider::new("[]")
///     .then_reply(r#"[{"term": "Foo", "definition": "A foo"}]"#)
///     .then_fail(InferenceError::Timeout);
///
/// let prompt = Prompt { system: String::new(), user: String::new() };
/// assert!(provider.complete(&prompt).await.unwrap().contains("Foo"));
/// assert!(provider.complete(&prompt).await.is_err());
/// assert_eq!(provider.complete(&prompt).await.unwrap(), "[]");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, InferenceError>>>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful reply for the next unscripted call
    pub fn then_reply(self, response: impl Into<String>) -> Self {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).push_back(Ok(response.into()));
        self
    }

    /// Queue a failure for the next unscripted call
    pub fn then_fail(self, error: InferenceError) -> Self {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).push_back(Err(error));
        self
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).push(prompt.clone());

        match self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front() {
            Some(reply) => reply,
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

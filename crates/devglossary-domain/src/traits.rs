//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! infrastructure. Implementations live in other crates.

use crate::error::{InferenceError, ProviderError, SinkError};
use crate::file::TreeEntry;
use crate::repo::RepoId;
use crate::term::TermBatch;
use async_trait::async_trait;

/// Source of repository listings and file content
///
/// Implemented by the infrastructure layer (devglossary-github)
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// List every entry of the default branch, recursively
    async fn list_tree(&self, repo: &RepoId) -> Result<Vec<TreeEntry>, ProviderError>;

    /// Fetch the decoded text content of a single file
    async fn file_content(&self, repo: &RepoId, path: &str) -> Result<String, ProviderError>;
}

/// A single inference request: fixed instructions plus the user payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// System instruction
    pub system: String,

    /// User message content
    pub user: String,
}

/// Trait for inference provider operations
///
/// Implemented by the infrastructure layer (devglossary-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the text of the reply
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError>;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}

/// Persistence boundary for the final ranked term list
#[async_trait]
pub trait TermSink: Send + Sync {
    /// Accept the final term list and its source metadata
    async fn accept(&self, batch: &TermBatch) -> Result<(), SinkError>;
}

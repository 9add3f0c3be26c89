//! Error types for extraction and the import pipeline

use devglossary_domain::{ProviderError, SinkError};
use thiserror::Error;

/// Errors raised while turning one inference reply into terms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Reply is not the expected JSON array
    #[error("Invalid term format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that abort an import run
///
/// Per-file and per-batch failures never show up here; they are absorbed and
/// reported through the run outcome instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Repository does not exist or is private
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// Repository host is throttling requests
    #[error("Repository host rate limit exceeded: {0}")]
    RateLimited(String),

    /// Listing failed for any other reason
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Caller exceeded the import quota
    #[error("Too many import requests from '{0}'")]
    TooManyRequests(String),

    /// Persisting the final terms failed
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ProviderError> for PipelineError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotFound(what) => PipelineError::RepositoryNotFound(what),
            ProviderError::RateLimited(what) => PipelineError::RateLimited(what),
            other => PipelineError::Upstream(other.to_string()),
        }
    }
}

impl PipelineError {
    /// Short actionable message for end users
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::RepositoryNotFound(_) => {
                "Repository not found or is private. Check the name or provide a token."
            }
            PipelineError::RateLimited(_) => {
                "GitHub API rate limit exceeded. Try again later or configure a token."
            }
            PipelineError::TooManyRequests(_) => "Too many requests. Please try again later.",
            PipelineError::Sink(_) => "Failed to save glossary terms.",
            PipelineError::Config(_) => "Import is not configured correctly.",
            PipelineError::Upstream(_) => "Failed to import repository.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_keep_their_class() {
        assert!(matches!(
            PipelineError::from(ProviderError::NotFound("a/b".to_string())),
            PipelineError::RepositoryNotFound(_)
        ));
        assert!(matches!(
            PipelineError::from(ProviderError::RateLimited("a/b".to_string())),
            PipelineError::RateLimited(_)
        ));
        assert!(matches!(
            PipelineError::from(ProviderError::Other("boom".to_string())),
            PipelineError::Upstream(_)
        ));
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let not_found = PipelineError::RepositoryNotFound("a/b".to_string());
        let limited = PipelineError::RateLimited("a/b".to_string());
        let generic = PipelineError::Upstream("boom".to_string());

        assert_ne!(not_found.user_message(), limited.user_message());
        assert_ne!(limited.user_message(), generic.user_message());
        assert!(not_found.user_message().contains("not found"));
    }
}

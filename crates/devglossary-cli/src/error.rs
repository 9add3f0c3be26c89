//! Error types for the CLI application.

use devglossary_domain::{InferenceError, ProviderError};
use devglossary_extractor::PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Import failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Repository provider could not be set up
    #[error("GitHub client error: {0}")]
    Provider(#[from] ProviderError),

    /// Inference provider could not be set up
    #[error("Inference client error: {0}")]
    Inference(#[from] InferenceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Message shown to the user on exit
    pub fn user_message(&self) -> String {
        match self {
            CliError::Pipeline(e) => format!("{} ({})", e.user_message(), e),
            other => other.to_string(),
        }
    }
}

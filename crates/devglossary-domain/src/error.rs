//! Error types raised at the trait seams

use thiserror::Error;

/// Errors surfaced by a repository provider
///
/// The three variants are kept distinct so callers can tell a missing or
/// private repository apart from upstream throttling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Repository or file does not exist, or is private
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream API rate limit exceeded
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Content could not be decoded as text
    #[error("Decode error: {0}")]
    Decode(String),

    /// Any other upstream failure
    #[error("Provider error: {0}")]
    Other(String),
}

/// Errors surfaced by an inference provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Response envelope was not understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by a term sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// Underlying I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terms could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

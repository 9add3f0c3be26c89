//! Request and result types for a pipeline run

use devglossary_domain::{ExtractedTerm, FileDescriptor, InferenceError, RepoId};
use std::fmt;

/// Request to import a repository into a glossary
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Repository to analyze
    pub repo: RepoId,

    /// Display name of the glossary project (defaults to the repository name)
    pub project_name: Option<String>,

    /// Identity used for the advisory import quota
    pub caller: String,
}

impl ImportRequest {
    /// Create a request with no display name
    pub fn new(repo: RepoId, caller: impl Into<String>) -> Self {
        Self {
            repo,
            project_name: None,
            caller: caller.into(),
        }
    }

    /// Name of the glossary project
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(&self.repo.repo)
    }
}

/// A file that was selected but could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the skipped file
    pub path: String,

    /// Why the fetch failed
    pub reason: String,
}

/// Result of fetching the selected files
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Files fetched successfully, in selection order
    pub files: Vec<FileDescriptor>,

    /// Files that were dropped
    pub skipped: Vec<SkippedFile>,
}

/// Why a batch contributed no terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFailure {
    /// Transport failure before a status was received
    Request(String),

    /// Endpoint answered with a non-success status
    Status(u16, String),

    /// Inference call did not finish in time
    Timeout,

    /// Reply could not be parsed into a term array
    Parse(String),
}

impl From<InferenceError> for BatchFailure {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::Status { status, body } => BatchFailure::Status(status, body),
            InferenceError::Timeout => BatchFailure::Timeout,
            InferenceError::InvalidResponse(msg) => BatchFailure::Parse(msg),
            InferenceError::Communication(msg) => BatchFailure::Request(msg),
        }
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchFailure::Request(msg) => write!(f, "request failed: {}", msg),
            BatchFailure::Status(status, body) => write!(f, "HTTP {}: {}", status, body),
            BatchFailure::Timeout => write!(f, "request timed out"),
            BatchFailure::Parse(msg) => write!(f, "unparseable reply: {}", msg),
        }
    }
}

/// Outcome of a single batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// Reply parsed; `rejected` counts records dropped by validation
    Extracted {
        /// Valid terms in reply order
        terms: Vec<ExtractedTerm>,
        /// Records that failed validation
        rejected: usize,
    },

    /// Batch contributed zero terms
    Failed {
        /// Failure reason
        reason: BatchFailure,
    },
}

impl BatchOutcome {
    /// Terms contributed by this batch (empty on failure)
    pub fn terms(&self) -> &[ExtractedTerm] {
        match self {
            BatchOutcome::Extracted { terms, .. } => terms,
            BatchOutcome::Failed { .. } => &[],
        }
    }

    /// Whether the batch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

/// One batch of a run and what became of it
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Zero-based batch index
    pub index: usize,

    /// Paths included in the batch
    pub paths: Vec<String>,

    /// Heuristic hints embedded in the prompt
    pub hints: Vec<String>,

    /// What the batch produced
    pub outcome: BatchOutcome,
}

/// Result of a completed run
///
/// An empty term list is a valid outcome, distinct from a pipeline error.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Repository analyzed
    pub repo: RepoId,

    /// Paths sent for extraction
    pub files_analyzed: Vec<String>,

    /// Selected files that could not be fetched
    pub skipped_files: Vec<SkippedFile>,

    /// Per-batch outcomes, in processing order
    pub batches: Vec<BatchReport>,

    /// Final ranked terms
    pub terms: Vec<ExtractedTerm>,
}

impl PipelineOutcome {
    /// True when no terms were extracted
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of batches that failed
    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.outcome.is_failed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_errors_map_to_batch_failures() {
        assert_eq!(
            BatchFailure::from(InferenceError::Status {
                status: 500,
                body: "oops".to_string()
            }),
            BatchFailure::Status(500, "oops".to_string())
        );
        assert_eq!(BatchFailure::from(InferenceError::Timeout), BatchFailure::Timeout);
        assert!(matches!(
            BatchFailure::from(InferenceError::Communication("reset".to_string())),
            BatchFailure::Request(_)
        ));
    }

    #[test]
    fn test_failed_outcome_has_no_terms() {
        let outcome = BatchOutcome::Failed {
            reason: BatchFailure::Timeout,
        };
        assert!(outcome.terms().is_empty());
        assert!(outcome.is_failed());
    }

    #[test]
    fn test_project_name_defaults_to_repo() {
        let repo = RepoId::new("octo", "widgets").unwrap();
        let mut request = ImportRequest::new(repo, "cli");
        assert_eq!(request.project_name(), "widgets");

        request.project_name = Some("Widget Glossary".to_string());
        assert_eq!(request.project_name(), "Widget Glossary");
    }
}

//! DevGlossary Repository Providers
//!
//! Implementations of the `RepositoryProvider` trait from `devglossary-domain`.
//!
//! # Providers
//!
//! - `GitHubProvider`: GitHub REST v3 (repository metadata, recursive git
//!   trees, base64 file contents)
//! - `MockRepository`: In-memory repository for testing
//!
//! # Examples
//!
//! ```
//! use devglossary_github::MockRepository;
//! use devglossary_domain::{RepoId, RepositoryProvider};
//!
//! # async fn example() {
//! let repo = MockRepository::new()
//!     .with_file("README.md", "# Widgets")
//!     .with_directory("src");
//!
//! let id = RepoId::parse("octo/widgets").unwrap();
//! assert_eq!(repo.list_tree(&id).await.unwrap().len(), 2);
//! # }
//! ```

#![warn(missing_docs)]

pub mod github;

use async_trait::async_trait;
use devglossary_domain::{ProviderError, RepoId, RepositoryProvider, TreeEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub use github::{GitHubConfig, GitHubProvider};

/// In-memory repository for deterministic testing
///
/// Entries are listed in insertion order. File content lookups can be made to
/// fail per path, and the whole listing can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    entries: Vec<TreeEntry>,
    contents: HashMap<String, Result<String, ProviderError>>,
    tree_error: Option<ProviderError>,
    content_requests: Arc<Mutex<Vec<String>>>,
}

impl MockRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose listing always fails
    pub fn failing(error: ProviderError) -> Self {
        Self {
            tree_error: Some(error),
            ..Self::default()
        }
    }

    /// Add a readable file
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.entries.push(TreeEntry::file(path.clone()));
        self.contents.insert(path, Ok(content.into()));
        self
    }

    /// Add a file whose content fetch fails
    pub fn with_broken_file(mut self, path: impl Into<String>, error: ProviderError) -> Self {
        let path = path.into();
        self.entries.push(TreeEntry::file(path.clone()));
        self.contents.insert(path, Err(error));
        self
    }

    /// Add a directory entry
    pub fn with_directory(mut self, path: impl Into<String>) -> Self {
        self.entries.push(TreeEntry::directory(path));
        self
    }

    /// Paths requested through `file_content`, in call order
    pub fn content_requests(&self) -> Vec<String> {
        self.content_requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl RepositoryProvider for MockRepository {
    async fn list_tree(&self, _repo: &RepoId) -> Result<Vec<TreeEntry>, ProviderError> {
        match &self.tree_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.entries.clone()),
        }
    }

    async fn file_content(&self, _repo: &RepoId, path: &str) -> Result<String, ProviderError> {
        self.content_requests.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_string());

        self.contents
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::NotFound(path.to_string())))
    }
}

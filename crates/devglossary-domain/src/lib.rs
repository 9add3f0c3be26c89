//! DevGlossary Domain Layer
//!
//! Value types and trait seams shared by every other crate in the workspace.
//!
//! ## Key Concepts
//!
//! - **Repository**: an `owner/repo` pair whose default branch is analyzed
//! - **Tree entry**: one record of the recursive repository listing
//! - **File descriptor**: a selected file together with its decoded text
//! - **Extracted term**: a glossary entry reported by the inference endpoint,
//!   carrying a confidence in `[0, 1]`
//!
//! ## Architecture
//!
//! - Pure data and validation only
//! - Network and persistence implementations live in other crates
//! - Trait definitions for every external interaction (repository listing,
//!   inference, term persistence)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod file;
pub mod repo;
pub mod term;
pub mod traits;

// Re-exports for convenience
pub use error::{InferenceError, ProviderError, SinkError};
pub use file::{EntryKind, FileDescriptor, TreeEntry};
pub use repo::RepoId;
pub use term::{slugify, ExtractedTerm, TermBatch};
pub use traits::{LlmProvider, Prompt, RepositoryProvider, TermSink};

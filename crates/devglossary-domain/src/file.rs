//! Repository listing entries and fetched file content

use serde::{Deserialize, Serialize};

/// Kind of a repository tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file (git `blob`)
    File,
    /// Directory (git `tree`)
    Directory,
    /// Anything else, e.g. a submodule (git `commit`)
    Other,
}

impl EntryKind {
    /// Map a git object type from a tree listing
    ///
    /// # Examples
    ///
    /// ```
    /// use devglossary_domain::EntryKind;
    ///
    /// assert_eq!(EntryKind::from_git_type("blob"), EntryKind::File);
    /// assert_eq!(EntryKind::from_git_type("tree"), EntryKind::Directory);
    /// assert_eq!(EntryKind::from_git_type("commit"), EntryKind::Other);
    /// ```
    pub fn from_git_type(kind: &str) -> Self {
        match kind {
            "blob" | "file" => EntryKind::File,
            "tree" | "dir" => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }
}

/// One record of a recursive repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root
    pub path: String,

    /// Entry kind
    pub kind: EntryKind,
}

impl TreeEntry {
    /// Create a file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A selected file and its decoded text content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path relative to the repository root
    pub path: String,

    /// Decoded UTF-8 content
    pub content: String,
}

impl FileDescriptor {
    /// Create a new file descriptor
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

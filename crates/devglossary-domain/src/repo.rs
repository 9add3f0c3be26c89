//! Repository identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// An `owner/repo` pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Account or organization that owns the repository
    pub owner: String,

    /// Repository name, without a `.git` suffix
    pub repo: String,
}

impl RepoId {
    /// Create a new repository identifier
    ///
    /// # Errors
    /// Returns error if either component is empty or contains a slash
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self, String> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || repo.is_empty() {
            return Err("owner and repo cannot be empty".to_string());
        }
        if owner.contains('/') || repo.contains('/') {
            return Err(format!("invalid repository '{}/{}'", owner, repo));
        }
        Ok(Self { owner, repo })
    }

    /// Parse user input into a repository identifier
    ///
    /// Accepts `https://github.com/owner/repo[/...]`, `github.com/owner/repo[/...]`
    /// and `owner/repo`. A trailing `.git` is removed from the repository name.
    ///
    /// # Examples
    ///
    /// ```
    /// use devglossary_domain::RepoId;
    ///
    /// let id = RepoId::parse("https://github.com/rust-lang/cargo.git").unwrap();
    /// assert_eq!(id.to_string(), "rust-lang/cargo");
    /// assert!(RepoId::parse("not a repo").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        let rest = input
            .strip_prefix("https://github.com/")
            .or_else(|| input.strip_prefix("http://github.com/"))
            .or_else(|| input.strip_prefix("github.com/"));

        let (owner, repo) = match rest {
            // URL forms allow trailing path segments (tree/main/..., issues, ...)
            Some(rest) => {
                let mut parts = rest.split('/');
                (parts.next()?, parts.next()?)
            }
            None => {
                if input.chars().any(char::is_whitespace) {
                    return None;
                }
                let (owner, repo) = input.split_once('/')?;
                if repo.contains('/') {
                    return None;
                }
                (owner, repo)
            }
        };

        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        Self::new(owner, repo).ok()
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_form() {
        let id = RepoId::parse("octo/widgets").unwrap();
        assert_eq!(id.owner, "octo");
        assert_eq!(id.repo, "widgets");
    }

    #[test]
    fn test_parse_https_url_with_extra_segments() {
        let id = RepoId::parse("https://github.com/octo/widgets/tree/main/docs").unwrap();
        assert_eq!(id.to_string(), "octo/widgets");
    }

    #[test]
    fn test_parse_bare_host() {
        let id = RepoId::parse("  github.com/octo/widgets.git  ").unwrap();
        assert_eq!(id.repo, "widgets");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RepoId::parse("").is_none());
        assert!(RepoId::parse("widgets").is_none());
        assert!(RepoId::parse("octo/widgets/extra").is_none());
        assert!(RepoId::parse("octo widgets/x").is_none());
        assert!(RepoId::parse("https://github.com/octo").is_none());
        assert!(RepoId::parse("/widgets").is_none());
    }

    #[test]
    fn test_new_rejects_slash() {
        assert!(RepoId::new("a/b", "c").is_err());
        assert!(RepoId::new("", "c").is_err());
    }
}

//! Extracted glossary terms

use crate::repo::RepoId;
use serde::{Deserialize, Serialize};

/// Confidence assigned when the inference endpoint omits one
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// A glossary term reported by the inference endpoint
///
/// Terms are only ever produced by parsing an inference response and are
/// validated before they reach the merge step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTerm {
    /// The term as spelled in the source documentation
    pub term: String,

    /// Plain-English definition
    pub definition: String,

    /// Categorization tags, in the order the model reported them
    #[serde(default)]
    pub tags: Vec<String>,

    /// Model-reported confidence in `[0, 1]`
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

impl ExtractedTerm {
    /// Create a term with no tags
    pub fn new(term: impl Into<String>, definition: impl Into<String>, confidence: f64) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            tags: Vec::new(),
            confidence,
        }
    }

    /// Attach tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validate that the term has a usable shape
    pub fn validate(&self) -> Result<(), String> {
        if self.term.trim().is_empty() {
            return Err("term is empty".to_string());
        }
        if !self.confidence.is_finite() || self.confidence < 0.0 || self.confidence > 1.0 {
            return Err(format!("confidence {} out of range [0.0, 1.0]", self.confidence));
        }
        Ok(())
    }

    /// Case-insensitive key used for deduplication
    pub fn dedup_key(&self) -> String {
        self.term.to_lowercase()
    }

    /// URL-safe slug for this term
    pub fn slug(&self) -> String {
        slugify(&self.term)
    }
}

/// Final term list handed to a [`crate::TermSink`], with source metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermBatch {
    /// Repository the terms were extracted from
    pub repo: RepoId,

    /// Display name of the glossary project
    pub project_name: String,

    /// Paths of the files actually sent for extraction
    pub files_analyzed: Vec<String>,

    /// Ranked terms
    pub terms: Vec<ExtractedTerm>,
}

/// Convert text into a lowercase, dash-separated slug
///
/// # Examples
///
/// ```
/// use devglossary_domain::slugify;
///
/// assert_eq!(slugify("Rate Limiter (v2)"), "rate-limiter-v2");
/// assert_eq!(slugify("  --JWT--  "), "jwt");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: slugs never start or end with a dash and never repeat one
        #[test]
        fn test_slug_shape(text in ".{0,64}") {
            let slug = slugify(&text);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        /// Property: slugify is idempotent
        #[test]
        fn test_slug_idempotent(text in "[A-Za-z0-9 _./-]{0,64}") {
            let once = slugify(&text);
            prop_assert_eq!(slugify(&once), once.clone());
        }
    }
}

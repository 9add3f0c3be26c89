//! Candidate file selection over a repository listing

use crate::config::SelectionConfig;
use devglossary_domain::TreeEntry;
use tracing::debug;

/// Selects which listed files are sent for analysis
pub struct FileSelector<'a> {
    config: &'a SelectionConfig,
}

impl<'a> FileSelector<'a> {
    /// Create a selector over the given configuration
    pub fn new(config: &'a SelectionConfig) -> Self {
        Self { config }
    }

    /// Paths of regular files with an allowed extension outside every
    /// excluded directory, in listing order
    pub fn select(&self, entries: &[TreeEntry]) -> Vec<String> {
        let selected: Vec<String> = entries
            .iter()
            .filter(|entry| entry.is_file())
            .filter(|entry| self.has_included_extension(&entry.path))
            .filter(|entry| !self.is_in_excluded_directory(&entry.path))
            .map(|entry| entry.path.clone())
            .collect();

        debug!("Selected {} of {} tree entries", selected.len(), entries.len());
        selected
    }

    fn has_included_extension(&self, path: &str) -> bool {
        self.config
            .included_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }

    /// Excluded names match as a leading segment or as any interior segment
    fn is_in_excluded_directory(&self, path: &str) -> bool {
        self.config.excluded_directories.iter().any(|dir| {
            path.strip_prefix(dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
                || path.contains(&format!("/{}/", dir))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(paths: &[&str]) -> Vec<String> {
        let config = SelectionConfig::default();
        let entries: Vec<_> = paths.iter().map(|p| TreeEntry::file(*p)).collect();
        FileSelector::new(&config).select(&entries)
    }

    #[test]
    fn test_reference_listing() {
        let selected = select(&[
            "src/app.ts",
            "node_modules/x/readme.md",
            "docs/intro.md",
            "test/util.ts",
        ]);
        assert_eq!(selected, vec!["src/app.ts", "docs/intro.md"]);
    }

    #[test]
    fn test_interior_segments_are_excluded() {
        let selected = select(&[
            "packages/web/node_modules/react/README.md",
            "crates/core/tests/fixtures.txt",
            "site/public/index.html",
            "lib/.git/HEAD.txt",
        ]);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_lookalike_directories_are_kept() {
        let selected = select(&["testing/guide.md", "builder/notes.md", "src/test_utils.py"]);
        assert_eq!(selected, vec!["testing/guide.md", "builder/notes.md", "src/test_utils.py"]);
    }

    #[test]
    fn test_disallowed_extensions() {
        let selected = select(&["Cargo.lock", "logo.png", "src/main.rs", "README.md"]);
        assert_eq!(selected, vec!["README.md"]);
    }

    #[test]
    fn test_directories_are_never_selected() {
        let config = SelectionConfig::default();
        let entries = vec![TreeEntry::directory("docs.md"), TreeEntry::file("docs/a.md")];
        assert_eq!(FileSelector::new(&config).select(&entries), vec!["docs/a.md"]);
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let selected = select(&["z.md", "a.md", "m/readme.txt"]);
        assert_eq!(selected, vec!["z.md", "a.md", "m/readme.txt"]);
    }
}

//! Heuristic term hints
//!
//! Syntactic passes over raw documentation text that surface likely glossary
//! candidates. Hints only bias the model; they never become terms on their own.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Shortest hint kept (characters)
pub const MIN_HINT_LEN: usize = 3;

/// Longest hint kept (characters)
pub const MAX_HINT_LEN: usize = 50;

// Markdown headers, levels 1-3
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,3}\s+([^#\n]+)").unwrap());
static RE_BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static RE_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
// ACRONYMS and CamelCase identifiers
static RE_CAPITALIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Z0-9]{2,}|[A-Z][a-z]*[A-Z][A-Za-z]*)\b").unwrap());

/// Collect up to `limit` distinct hints from `text`, in first-seen order
///
/// Each pattern runs as an independent pass over the whole text, so all header
/// hints precede all bold hints, and so on.
pub fn extract_hints(text: &str, limit: usize) -> Vec<String> {
    let passes: [&Regex; 5] = [
        &RE_HEADER,
        &RE_BOLD_STARS,
        &RE_BOLD_UNDERSCORES,
        &RE_INLINE_CODE,
        &RE_CAPITALIZED,
    ];

    let mut seen = HashSet::new();
    let mut hints = Vec::new();

    for pattern in passes {
        for captures in pattern.captures_iter(text) {
            let Some(candidate) = captures.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if is_plausible_hint(candidate) && seen.insert(candidate.to_string()) {
                hints.push(candidate.to_string());
            }
        }
    }

    hints.truncate(limit);
    hints
}

fn is_plausible_hint(candidate: &str) -> bool {
    let len = candidate.chars().count();
    (MIN_HINT_LEN..=MAX_HINT_LEN).contains(&len) && !candidate.chars().any(char::is_whitespace)
}

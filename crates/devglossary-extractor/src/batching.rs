//! Batch planning and per-file truncation

use crate::error::ExtractorError;
use devglossary_domain::FileDescriptor;
use std::borrow::Cow;

/// Appended to file content cut at the character cap
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Partitions fetched files into fixed-size batches
///
/// Membership is purely by file count; a file is never split across batches.
#[derive(Debug, Clone, Copy)]
pub struct BatchPlanner {
    batch_size: usize,
}

impl BatchPlanner {
    /// Create a new batch planner
    pub fn new(batch_size: usize) -> Result<Self, ExtractorError> {
        if batch_size == 0 {
            return Err(ExtractorError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { batch_size })
    }

    /// Consecutive, non-overlapping batches in input order; the last one may
    /// be smaller than the batch size
    pub fn plan<'a>(&self, files: &'a [FileDescriptor]) -> Vec<&'a [FileDescriptor]> {
        files.chunks(self.batch_size).collect()
    }

    /// Number of batches `plan` produces for `file_count` files
    pub fn batch_count(&self, file_count: usize) -> usize {
        file_count.div_ceil(self.batch_size)
    }
}

/// Cut `content` to at most `max_chars` characters, marking the cut
///
/// Counts Unicode scalar values so a multi-byte character is never split.
pub fn truncate_content(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{}", &content[..byte_idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(content),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: batches are bounded and concatenate back to the input
        #[test]
        fn test_batches_round_trip(count in 0usize..120, batch_size in 1usize..30) {
            let files: Vec<_> = (0..count)
                .map(|i| FileDescriptor::new(format!("f{}.md", i), "x"))
                .collect();
            let planner = BatchPlanner::new(batch_size).unwrap();
            let batches = planner.plan(&files);

            prop_assert_eq!(batches.len(), planner.batch_count(count));
            for batch in &batches {
                prop_assert!(!batch.is_empty());
                prop_assert!(batch.len() <= batch_size);
            }
            let rejoined: Vec<FileDescriptor> = batches.concat();
            prop_assert_eq!(rejoined, files);
        }

        /// Property: truncated output keeps a prefix of the input
        #[test]
        fn test_truncation_keeps_prefix(content in ".{0,200}", cap in 1usize..100) {
            let truncated = truncate_content(&content, cap);
            let kept = truncated.strip_suffix(TRUNCATION_MARKER).unwrap_or(&*truncated);
            prop_assert!(content.starts_with(kept));
            prop_assert!(kept.chars().count() <= cap);
        }
    }
}

//! Prompt construction for glossary extraction

use crate::batching::truncate_content;
use devglossary_domain::{FileDescriptor, Prompt};

/// Builds the inference request for one batch of files
pub struct PromptBuilder<'a> {
    files: &'a [FileDescriptor],
    max_file_chars: usize,
    hints: &'a [String],
    hint_limit: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder over a batch
    pub fn new(files: &'a [FileDescriptor], max_file_chars: usize) -> Self {
        Self {
            files,
            max_file_chars,
            hints: &[],
            hint_limit: 0,
        }
    }

    /// Add heuristic hints; at most `limit` of them are embedded
    pub fn with_hints(mut self, hints: &'a [String], limit: usize) -> Self {
        self.hints = hints;
        self.hint_limit = limit;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> Prompt {
        Prompt {
            system: SYSTEM_INSTRUCTIONS.to_string(),
            user: self.user_payload(),
        }
    }

    fn user_payload(&self) -> String {
        let mut payload = String::from("Repository documentation to analyze for technical terms:\n\n");

        for file in self.files {
            let content = truncate_content(&file.content, self.max_file_chars);
            payload.push_str(&format!("## {}\n\n{}\n\n---\n\n", file.path, content));
        }

        let hints: Vec<&str> = self
            .hints
            .iter()
            .take(self.hint_limit)
            .map(String::as_str)
            .collect();
        if !hints.is_empty() {
            payload.push_str(&format!(
                "\nPotential terms found (use as hints): {}\n\n",
                hints.join(", ")
            ));
        }

        payload.push_str(CLOSING_INSTRUCTION);
        payload
    }
}

const SYSTEM_INSTRUCTIONS: &str = r#"You are an API that converts repository documentation into a developer glossary for onboarding.
Return ONLY valid JSON matching this schema:
[
  {
    "term": "string",
    "definition": "plain-English, 2-4 sentences, no markdown",
    "tags": ["string"],
    "confidence": 0-1
  }
]

Rules:
- Focus on domain concepts, internal acronyms, module/service names, and technical terminology
- Avoid trivial programming terms like "function" or "variable"
- Definitions must be independent and self-contained (no "as above")
- Keep each definition <= 80 words, clear and concise
- Include relevant tags for categorization
- Set confidence based on how clearly the term is defined in the documentation
- Extract 10-30 terms maximum, prioritizing the most important ones"#;

const CLOSING_INSTRUCTION: &str = "Extract the most important technical terms from this documentation.";

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use devglossary_domain::{ExtractedTerm, RepoId};
use devglossary_extractor::{BatchOutcome, PipelineOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DEFINITION_PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of an import.
    pub fn format_outcome(&self, outcome: &PipelineOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outcome_json(outcome),
            OutputFormat::Table => Ok(self.format_outcome_table(outcome)),
            OutputFormat::Quiet => Ok(Self::format_terms_quiet(&outcome.terms)),
        }
    }

    /// Format a parsed repository reference.
    pub fn format_repo(&self, repo: &RepoId) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(repo)?),
            _ => Ok(repo.to_string()),
        }
    }

    fn format_outcome_json(&self, outcome: &PipelineOutcome) -> Result<String> {
        let batches: Vec<serde_json::Value> = outcome
            .batches
            .iter()
            .map(|b| match &b.outcome {
                BatchOutcome::Extracted { terms, rejected } => serde_json::json!({
                    "index": b.index,
                    "files": b.paths.len(),
                    "terms": terms.len(),
                    "rejected": rejected,
                }),
                BatchOutcome::Failed { reason } => serde_json::json!({
                    "index": b.index,
                    "files": b.paths.len(),
                    "error": reason.to_string(),
                }),
            })
            .collect();

        let json = serde_json::json!({
            "repo": outcome.repo.to_string(),
            "files_found": outcome.files_analyzed,
            "files_skipped": outcome
                .skipped_files
                .iter()
                .map(|s| serde_json::json!({ "path": s.path, "reason": s.reason }))
                .collect::<Vec<_>>(),
            "batches": batches,
            "terms_extracted": outcome.terms.len(),
            "terms": outcome.terms,
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_outcome_table(&self, outcome: &PipelineOutcome) -> String {
        let mut lines = vec![self.info(&format!(
            "{}: {} files analyzed, {} skipped, {}/{} batches succeeded",
            outcome.repo,
            outcome.files_analyzed.len(),
            outcome.skipped_files.len(),
            outcome.batches.len() - outcome.failed_batches(),
            outcome.batches.len()
        ))];

        for batch in outcome.batches.iter() {
            if let BatchOutcome::Failed { reason } = &batch.outcome {
                lines.push(self.warning(&format!("Batch {} failed: {}", batch.index + 1, reason)));
            }
        }

        if outcome.is_empty() {
            lines.push(self.colorize("No terms found.", "yellow"));
            return lines.join("\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["Term", "Confidence", "Tags", "Definition"]);

        for term in &outcome.terms {
            builder.push_record([
                term.term.clone(),
                format!("{:.2}", term.confidence),
                term.tags.join(", "),
                preview(&term.definition),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        lines.push(table.to_string());
        lines.join("\n")
    }

    fn format_terms_quiet(terms: &[ExtractedTerm]) -> String {
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        names.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether anything beyond the primary result should be printed.
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn preview(definition: &str) -> String {
    match definition.char_indices().nth(DEFINITION_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}…", &definition[..idx]),
        None => definition.to_string(),
    }
}

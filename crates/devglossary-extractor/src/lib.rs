//! DevGlossary Extractor
//!
//! Turns a hosted repository into a ranked developer glossary.
//!
//! # Overview
//!
//! The pipeline lists a repository, keeps the files worth reading, fetches
//! their text and sends it in fixed-size batches to an inference endpoint
//! that reports glossary terms. Batch results are merged, deduplicated and
//! ranked by confidence before being handed to a term sink.
//!
//! # Architecture
//!
//! ```text
//! RepoId → list tree → FileSelector → fetch → BatchPlanner
//!        → [hints + prompt → LLM → parser] per batch → merge_and_rank → TermSink
//! ```
//!
//! # Key Features
//!
//! - **Selection**: extension allow-list and directory deny-list at any depth
//! - **Batching**: fixed-size batches, per-file truncation with a marker
//! - **Hinting**: syntactic term candidates embedded into each prompt
//! - **Pacing**: strictly sequential batches with a pause between requests
//! - **Partial failure**: unreadable files and failed batches are reported,
//!   never fatal
//! - **Quota**: optional per-caller import limit
//!
//! # Example Usage
//!
//! ```no_run
//! use devglossary_extractor::{
//!     ExtractorConfig, GlossaryPipeline, ImportRequest, JsonFileSink, SelectionConfig,
//! };
//! use devglossary_domain::RepoId;
//! use devglossary_github::{GitHubConfig, GitHubProvider};
//! use devglossary_llm::{AnthropicConfig, AnthropicProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let github = GitHubProvider::new(GitHubConfig::default())?;
//! let llm = AnthropicProvider::new(AnthropicConfig::with_key("sk-ant-..."))?;
//!
//! let pipeline = GlossaryPipeline::new(
//!     github,
//!     llm,
//!     SelectionConfig::default(),
//!     ExtractorConfig::default(),
//! )?;
//!
//! let repo = RepoId::parse("rust-lang/cargo").ok_or("bad repository")?;
//! let sink = JsonFileSink::new("glossary.json");
//! let outcome = pipeline.import(&ImportRequest::new(repo, "local"), &sink).await?;
//!
//! println!("Files analyzed: {}", outcome.files_analyzed.len());
//! println!("Terms: {}", outcome.terms.len());
//! println!("Failed batches: {}", outcome.failed_batches());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batching;
mod config;
mod error;
mod extractor;
mod fetcher;
mod hints;
mod merge;
mod parser;
mod pipeline;
mod prompt;
mod rate_limit;
mod selector;
mod sink;
mod types;

#[cfg(test)]
mod tests;

pub use batching::{truncate_content, BatchPlanner, TRUNCATION_MARKER};
pub use config::{ExtractorConfig, SelectionConfig};
pub use error::{ExtractorError, PipelineError};
pub use extractor::Extractor;
pub use fetcher::fetch_contents;
pub use hints::extract_hints;
pub use merge::merge_and_rank;
pub use parser::{parse_llm_response, ParsedReply};
pub use pipeline::GlossaryPipeline;
pub use prompt::PromptBuilder;
pub use rate_limit::{Clock, ManualClock, RateLimitConfig, RateLimitRegistry, SystemClock};
pub use selector::FileSelector;
pub use sink::{JsonFileSink, MemorySink};
pub use types::{
    BatchFailure, BatchOutcome, BatchReport, FetchReport, ImportRequest, PipelineOutcome,
    SkippedFile,
};

//! Core Extractor implementation

use crate::batching::BatchPlanner;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::hints::extract_hints;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::{BatchFailure, BatchOutcome, BatchReport};
use devglossary_domain::{FileDescriptor, LlmProvider, Prompt};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

/// The Extractor turns batches of documentation files into glossary terms
///
/// Batches are processed strictly one after another, with a fixed pause
/// between consecutive requests. A failing batch is recorded and skipped; it
/// never aborts the run.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    planner: BatchPlanner,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let planner = BatchPlanner::new(config.batch_size)?;

        Ok(Self {
            llm_provider,
            planner,
            config,
        })
    }

    /// Configuration in effect
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run every batch of `files` and report each outcome in batch order
    pub async fn extract(&self, files: &[FileDescriptor]) -> Vec<BatchReport> {
        let batches = self.planner.plan(files);
        let total = batches.len();

        info!(
            "Extracting terms from {} files in {} batches using {}",
            files.len(),
            total,
            self.llm_provider.model_name()
        );

        let mut reports = Vec::with_capacity(total);
        for (index, batch) in batches.into_iter().enumerate() {
            info!("Processing batch {} of {}", index + 1, total);
            let report = self.extract_batch(index, batch).await;

            match &report.outcome {
                BatchOutcome::Extracted { terms, rejected } => info!(
                    "Batch {} produced {} terms ({} rejected)",
                    index + 1,
                    terms.len(),
                    rejected
                ),
                BatchOutcome::Failed { reason } => {
                    warn!("Batch {} failed: {}", index + 1, reason)
                }
            }
            reports.push(report);

            if index + 1 < total {
                debug!("Pausing {:?} before next batch", self.config.inter_batch_delay());
                sleep(self.config.inter_batch_delay()).await;
            }
        }

        reports
    }

    /// Build, send and parse a single batch
    async fn extract_batch(&self, index: usize, batch: &[FileDescriptor]) -> BatchReport {
        let combined = batch
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let hints = extract_hints(&combined, self.config.max_hints);

        let prompt = PromptBuilder::new(batch, self.config.max_file_chars)
            .with_hints(&hints, self.config.prompt_hints)
            .build();

        debug!("Prompt length: {} chars", prompt.user.len());

        let outcome = match self.call_llm(&prompt).await {
            Ok(reply) => {
                debug!("LLM response length: {} chars", reply.len());
                match parse_llm_response(&reply) {
                    Ok(parsed) => BatchOutcome::Extracted {
                        terms: parsed.terms,
                        rejected: parsed.rejected,
                    },
                    Err(e) => BatchOutcome::Failed {
                        reason: BatchFailure::Parse(e.to_string()),
                    },
                }
            }
            Err(reason) => BatchOutcome::Failed { reason },
        };

        BatchReport {
            index,
            paths: batch.iter().map(|f| f.path.clone()).collect(),
            hints,
            outcome,
        }
    }

    /// Call the LLM provider under the request timeout
    async fn call_llm(&self, prompt: &Prompt) -> Result<String, BatchFailure> {
        timeout(self.config.request_timeout(), self.llm_provider.complete(prompt))
            .await
            .map_err(|_| BatchFailure::Timeout)?
            .map_err(BatchFailure::from)
    }
}

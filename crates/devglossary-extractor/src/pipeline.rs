//! End-to-end import: listing, selection, fetching, extraction, ranking

use crate::config::{ExtractorConfig, SelectionConfig};
use crate::error::PipelineError;
use crate::extractor::Extractor;
use crate::fetcher::fetch_contents;
use crate::merge::merge_and_rank;
use crate::rate_limit::{Clock, RateLimitRegistry, SystemClock};
use crate::selector::FileSelector;
use crate::types::{ImportRequest, PipelineOutcome};
use devglossary_domain::{LlmProvider, RepoId, RepositoryProvider, TermBatch, TermSink};
use tracing::{info, warn};

/// Drives one repository through the whole extraction flow
///
/// Only a failed repository listing (or a denied quota) aborts a run. Files
/// that cannot be fetched and batches that fail are reported in the outcome.
pub struct GlossaryPipeline<R, L, C = SystemClock>
where
    R: RepositoryProvider,
    L: LlmProvider,
    C: Clock,
{
    repository: R,
    extractor: Extractor<L>,
    selection: SelectionConfig,
    rate_limit: Option<RateLimitRegistry<C>>,
}

impl<R, L> GlossaryPipeline<R, L, SystemClock>
where
    R: RepositoryProvider,
    L: LlmProvider,
{
    /// Create a pipeline with no import quota
    pub fn new(
        repository: R,
        llm_provider: L,
        selection: SelectionConfig,
        config: ExtractorConfig,
    ) -> Result<Self, PipelineError> {
        selection.validate().map_err(PipelineError::Config)?;
        let extractor =
            Extractor::new(llm_provider, config).map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(Self {
            repository,
            extractor,
            selection,
            rate_limit: None,
        })
    }
}

impl<R, L, C> GlossaryPipeline<R, L, C>
where
    R: RepositoryProvider,
    L: LlmProvider,
    C: Clock,
{
    /// Enforce a per-caller quota on [`GlossaryPipeline::import`]
    pub fn with_rate_limit<C2: Clock>(self, registry: RateLimitRegistry<C2>) -> GlossaryPipeline<R, L, C2> {
        GlossaryPipeline {
            repository: self.repository,
            extractor: self.extractor,
            selection: self.selection,
            rate_limit: Some(registry),
        }
    }

    /// Extract the ranked term list for `repo`
    pub async fn run(&self, repo: &RepoId) -> Result<PipelineOutcome, PipelineError> {
        info!("Listing repository {}", repo);
        let entries = self.repository.list_tree(repo).await?;

        let selected = FileSelector::new(&self.selection).select(&entries);
        info!("Found {} candidate files in {}", selected.len(), repo);

        let fetched = fetch_contents(&self.repository, repo, &selected).await;
        let files_analyzed: Vec<String> = fetched.files.iter().map(|f| f.path.clone()).collect();

        let batches = self.extractor.extract(&fetched.files).await;

        let config = self.extractor.config();
        let terms = merge_and_rank(
            batches.iter().flat_map(|b| b.outcome.terms().iter().cloned()),
            config.min_confidence,
            config.max_terms,
        );

        let outcome = PipelineOutcome {
            repo: repo.clone(),
            files_analyzed,
            skipped_files: fetched.skipped,
            batches,
            terms,
        };

        if outcome.failed_batches() > 0 {
            warn!(
                "{} of {} batches failed for {}",
                outcome.failed_batches(),
                outcome.batches.len(),
                repo
            );
        }
        info!("Extracted {} terms from {}", outcome.terms.len(), repo);

        Ok(outcome)
    }

    /// Run an import request and hand the result to `sink`
    ///
    /// The sink is skipped when no terms were extracted.
    pub async fn import<S>(&self, request: &ImportRequest, sink: &S) -> Result<PipelineOutcome, PipelineError>
    where
        S: TermSink + ?Sized,
    {
        if let Some(registry) = &self.rate_limit {
            if !registry.check(&request.caller) {
                return Err(PipelineError::TooManyRequests(request.caller.clone()));
            }
        }

        let outcome = self.run(&request.repo).await?;
        if outcome.is_empty() {
            info!("No terms extracted from {}; nothing to save", request.repo);
            return Ok(outcome);
        }

        let batch = TermBatch {
            repo: request.repo.clone(),
            project_name: request.project_name().to_string(),
            files_analyzed: outcome.files_analyzed.clone(),
            terms: outcome.terms.clone(),
        };
        sink.accept(&batch).await?;

        Ok(outcome)
    }
}

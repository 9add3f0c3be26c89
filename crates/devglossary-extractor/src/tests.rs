//! Integration tests for the import pipeline

#[cfg(test)]
mod tests {
    use crate::{
        BatchFailure, BatchOutcome, ExtractorConfig, GlossaryPipeline, ImportRequest, MemorySink,
        PipelineError, SelectionConfig,
    };
    use devglossary_domain::{InferenceError, ProviderError, RepoId};
    use devglossary_github::MockRepository;
    use devglossary_llm::MockProvider;
    use std::time::Duration;

    fn repo() -> RepoId {
        RepoId::parse("https://github.com/octo/widgets").unwrap()
    }

    fn quiet_config(batch_size: usize) -> ExtractorConfig {
        ExtractorConfig {
            batch_size,
            inter_batch_delay_ms: 0,
            ..ExtractorConfig::default()
        }
    }

    fn docs_repository(count: usize) -> MockRepository {
        (0..count).fold(MockRepository::new(), |repo, i| {
            repo.with_file(format!("docs/page{:02}.md", i), format!("Page {}", i))
        })
    }

    fn reply(terms: &[(&str, f64)]) -> String {
        let records: Vec<String> = terms
            .iter()
            .map(|(term, confidence)| {
                format!(
                    r#"{{"term": "{}", "definition": "About {}.", "tags": [], "confidence": {}}}"#,
                    term, term, confidence
                )
            })
            .collect();
        format!("[{}]", records.join(","))
    }

    #[tokio::test]
    async fn test_failed_middle_batch_keeps_the_rest() {
        let llm = MockProvider::new("[]")
            .then_reply(reply(&[("Widget", 0.9), ("Gadget", 0.6)]))
            .then_fail(InferenceError::Status {
                status: 500,
                body: "internal error".to_string(),
            })
            .then_reply(reply(&[("Sprocket", 0.7)]));
        let pipeline = GlossaryPipeline::new(
            docs_repository(45),
            llm.clone(),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert_eq!(llm.call_count(), 3);
        assert_eq!(outcome.batches.len(), 3);
        assert_eq!(outcome.failed_batches(), 1);
        assert_eq!(
            outcome.batches[1].outcome,
            BatchOutcome::Failed {
                reason: BatchFailure::Status(500, "internal error".to_string())
            }
        );
        let names: Vec<_> = outcome.terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["Widget", "Sprocket", "Gadget"]);
    }

    #[tokio::test]
    async fn test_missing_repository_touches_nothing_else() {
        let repository = MockRepository::failing(ProviderError::NotFound("octo/widgets".to_string()));
        let llm = MockProvider::default();
        let pipeline = GlossaryPipeline::new(
            repository.clone(),
            llm.clone(),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();
        let sink = MemorySink::new();

        let result = pipeline.import(&ImportRequest::new(repo(), "cli"), &sink).await;

        let err = result.unwrap_err();
        assert!(matches!(err, PipelineError::RepositoryNotFound(_)));
        assert!(err.user_message().contains("not found"));
        assert!(repository.content_requests().is_empty());
        assert_eq!(llm.call_count(), 0);
        assert!(sink.batches().is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_across_batches_keep_first_occurrence() {
        let llm = MockProvider::new("[]")
            .then_reply(reply(&[("Foo", 0.9)]))
            .then_reply(reply(&[("foo", 0.95)]));
        let pipeline = GlossaryPipeline::new(
            docs_repository(2),
            llm,
            SelectionConfig::default(),
            quiet_config(1),
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert_eq!(outcome.terms.len(), 1);
        assert_eq!(outcome.terms[0].term, "Foo");
        assert_eq!(outcome.terms[0].confidence, 0.9);
    }

    #[tokio::test]
    async fn test_no_terms_is_a_successful_empty_outcome() {
        let pipeline = GlossaryPipeline::new(
            docs_repository(3),
            MockProvider::new(reply(&[("Faint", 0.1)])),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.failed_batches(), 0);
        assert_eq!(outcome.files_analyzed.len(), 3);
    }

    #[tokio::test]
    async fn test_nothing_selectable_means_no_batches() {
        let repository = MockRepository::new()
            .with_file("node_modules/lib/README.md", "vendored")
            .with_file("assets/logo.png", "binary");
        let llm = MockProvider::default();
        let pipeline = GlossaryPipeline::new(
            repository.clone(),
            llm.clone(),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert!(outcome.batches.is_empty());
        assert!(outcome.is_empty());
        assert!(repository.content_requests().is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_files_are_reported_and_skipped() {
        let repository = MockRepository::new()
            .with_file("README.md", "# Widget")
            .with_broken_file("docs/secret.md", ProviderError::Other("HTTP 403".to_string()));
        let llm = MockProvider::new(reply(&[("Widget", 0.8)]));
        let pipeline = GlossaryPipeline::new(
            repository,
            llm.clone(),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert_eq!(outcome.files_analyzed, vec!["README.md"]);
        assert_eq!(outcome.skipped_files.len(), 1);
        assert_eq!(outcome.skipped_files[0].path, "docs/secret.md");
        assert!(!llm.prompts()[0].user.contains("docs/secret.md"));
    }

    #[tokio::test]
    async fn test_prompt_carries_truncated_content_and_hints() {
        let long_doc = format!("# Sprocket\n{}", "word ".repeat(2000));
        let repository = MockRepository::new().with_file("docs/big.md", long_doc);
        let llm = MockProvider::default();
        let pipeline = GlossaryPipeline::new(
            repository,
            llm.clone(),
            SelectionConfig::default(),
            quiet_config(20),
        )
        .unwrap();

        pipeline.run(&repo()).await.unwrap();

        let prompt = &llm.prompts()[0];
        assert!(prompt.user.contains("## docs/big.md\n\n# Sprocket"));
        assert!(prompt.user.contains("...[truncated]"));
        assert!(prompt.user.contains("Potential terms found (use as hints): Sprocket"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_batches_are_paced() {
        let pipeline = GlossaryPipeline::new(
            docs_repository(3),
            MockProvider::default(),
            SelectionConfig::default(),
            ExtractorConfig {
                batch_size: 1,
                ..ExtractorConfig::default()
            },
        )
        .unwrap();

        let start = tokio::time::Instant::now();
        pipeline.run(&repo()).await.unwrap();
        let elapsed = start.elapsed();

        // default pause of two seconds, twice
        assert!(elapsed >= Duration::from_secs(4));
        assert!(elapsed < Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_ranked_output_is_capped() {
        let many: Vec<(String, f64)> = (0..40).map(|i| (format!("Term{:02}", i), 0.5)).collect();
        let borrowed: Vec<(&str, f64)> = many.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        let pipeline = GlossaryPipeline::new(
            docs_repository(1),
            MockProvider::new(reply(&borrowed)),
            SelectionConfig::default(),
            ExtractorConfig {
                max_terms: 25,
                ..quiet_config(20)
            },
        )
        .unwrap();

        let outcome = pipeline.run(&repo()).await.unwrap();

        assert_eq!(outcome.terms.len(), 25);
        assert_eq!(outcome.terms[0].term, "Term00");
    }
}

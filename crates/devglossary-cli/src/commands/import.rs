//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use devglossary_domain::RepoId;
use devglossary_extractor::{GlossaryPipeline, ImportRequest, JsonFileSink};
use devglossary_github::GitHubProvider;
use devglossary_llm::AnthropicProvider;
use std::env;
use tracing::debug;

const CLI_CALLER: &str = "cli";

/// Execute the import command.
pub async fn execute_import(args: ImportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let repo = parse_repo(&args.repo)?;

    let mut github_config = config.github.clone();
    if args.github_token.is_some() {
        github_config.token = args.github_token.clone();
    }

    let mut anthropic_config = config.anthropic.clone();
    let fallback = env::var("ANTHROPIC_API_KEY").ok();
    anthropic_config.api_key = resolve_api_key(args.api_key.as_deref(), fallback).ok_or_else(|| {
        CliError::Config("Anthropic API key not configured (set CLAUDE_KEY or ANTHROPIC_API_KEY)".to_string())
    })?;
    anthropic_config.validate().map_err(CliError::Config)?;

    debug!("Using model {} at {}", anthropic_config.model, anthropic_config.endpoint);

    let repository = GitHubProvider::new(github_config)?;
    let llm = AnthropicProvider::new(anthropic_config)?;
    let pipeline = GlossaryPipeline::new(
        repository,
        llm,
        config.selection.clone(),
        config.extractor.clone(),
    )?;

    // a one-shot process has no quota to enforce
    let request = ImportRequest {
        repo,
        project_name: args.name,
        caller: CLI_CALLER.to_string(),
    };
    let sink = JsonFileSink::new(&args.out);

    if !formatter.is_quiet() {
        eprintln!("{}", formatter.info(&format!("Importing {}...", request.repo)));
    }

    let outcome = pipeline.import(&request, &sink).await?;

    println!("{}", formatter.format_outcome(&outcome)?);
    if !formatter.is_quiet() {
        if outcome.is_empty() {
            eprintln!("{}", formatter.warning("No terms could be extracted; nothing was written"));
        } else {
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Saved {} terms to {}",
                    outcome.terms.len(),
                    sink.path().display()
                ))
            );
        }
    }

    Ok(())
}

/// Parse a repository reference or explain the accepted forms.
pub fn parse_repo(input: &str) -> Result<RepoId> {
    RepoId::parse(input).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Invalid repository format '{}'. Use owner/repo or GitHub URL",
            input
        ))
    })
}

/// Explicit key first, then the fallback (`ANTHROPIC_API_KEY`); blank keys
/// count as absent.
fn resolve_api_key(explicit: Option<&str>, fallback: Option<String>) -> Option<String> {
    let usable = |key: &String| !key.trim().is_empty();

    explicit
        .map(str::to_string)
        .filter(usable)
        .or_else(|| fallback.filter(usable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_forms() {
        assert_eq!(parse_repo("octo/widgets").unwrap().to_string(), "octo/widgets");
        assert_eq!(
            parse_repo("https://github.com/octo/widgets/tree/main/docs").unwrap().to_string(),
            "octo/widgets"
        );
    }

    #[test]
    fn test_parse_repo_rejects_garbage() {
        let err = parse_repo("widgets").unwrap_err();
        assert!(err.to_string().contains("Invalid repository format"));
    }

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key(Some("sk-explicit"), Some("sk-fallback".to_string()));
        assert_eq!(key.as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn test_blank_explicit_key_falls_back() {
        let key = resolve_api_key(Some("   "), Some("sk-fallback".to_string()));
        assert_eq!(key.as_deref(), Some("sk-fallback"));
    }

    #[test]
    fn test_no_usable_key() {
        assert_eq!(resolve_api_key(Some("  "), None), None);
        assert_eq!(resolve_api_key(None, Some(" ".to_string())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }
}

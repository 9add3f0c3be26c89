//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DevGlossary CLI - Build a developer glossary from a GitHub repository.
#[derive(Debug, Parser)]
#[command(name = "devglossary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (term names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a glossary from a repository and save it
    Import(ImportArgs),

    /// Check how a repository reference is interpreted
    Parse(ParseArgs),

    /// Write a configuration file with the default settings
    Init(InitArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Repository (owner/repo or GitHub URL)
    pub repo: String,

    /// Glossary project name (defaults to the repository name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Where to write the glossary JSON
    #[arg(short, long, default_value = "glossary.json")]
    pub out: PathBuf,

    /// GitHub token for private repositories and higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Anthropic API key (falls back to ANTHROPIC_API_KEY)
    #[arg(long, env = "CLAUDE_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Repository (owner/repo or GitHub URL)
    pub repo: String,
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Smaller batches and longer pauses, for low-tier API keys
    #[arg(long)]
    pub conservative: bool,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

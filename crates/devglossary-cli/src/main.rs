//! DevGlossary CLI - Build a developer glossary from a GitHub repository.

use clap::Parser;
use devglossary_cli::commands;
use devglossary_cli::config::OutputFormat;
use devglossary_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // the configured formatter may not exist yet if loading the config failed
    let errors = Formatter::new(OutputFormat::Table, !cli.no_color);

    if let Err(e) = run(cli).await {
        eprintln!("{}", errors.error(&e.user_message()));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> devglossary_cli::Result<()> {
    // init must work even when the existing file is invalid
    if let Command::Init(args) = cli.command {
        let formatter = Formatter::new(OutputFormat::Table, !cli.no_color);
        return commands::execute_init(args, cli.config.as_deref(), &formatter);
    }

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Import(args) => commands::execute_import(args, &config, &formatter).await?,
        Command::Parse(args) => commands::execute_parse(args, &formatter)?,
        Command::Init(_) => unreachable!(),
    }

    Ok(())
}

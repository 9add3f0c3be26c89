//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::commands::import::parse_repo;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the parse command.
pub fn execute_parse(args: ParseArgs, formatter: &Formatter) -> Result<()> {
    let repo = parse_repo(&args.repo)?;
    println!("{}", formatter.format_repo(&repo)?);
    Ok(())
}

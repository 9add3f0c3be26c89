//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use devglossary_extractor::ExtractorConfig;
use std::path::Path;

/// Execute the init command.
pub fn execute_init(args: InitArgs, path: Option<&Path>, formatter: &Formatter) -> Result<()> {
    let path = Config::resolve_path(path)?;
    write_default_config(&path, args.conservative, args.force)?;

    if !formatter.is_quiet() {
        println!("{}", formatter.success(&format!("Wrote configuration to {}", path.display())));
    }
    Ok(())
}

fn write_default_config(path: &Path, conservative: bool, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    if conservative {
        config.extractor = ExtractorConfig::conservative();
    }
    config.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path, false, false).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.extractor.batch_size, ExtractorConfig::default().batch_size);
    }

    #[test]
    fn test_conservative_preset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        write_default_config(&path, true, false).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.extractor.batch_size, ExtractorConfig::conservative().batch_size);
        assert!(config.extractor.batch_size < ExtractorConfig::default().batch_size);
    }

    #[test]
    fn test_existing_file_needs_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[extractor]\nbatch_size = 3\n").unwrap();

        assert!(matches!(
            write_default_config(&path, false, false),
            Err(CliError::InvalidInput(_))
        ));
        assert_eq!(Config::load(Some(&path)).unwrap().extractor.batch_size, 3);

        write_default_config(&path, false, true).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().extractor.batch_size, 20);
    }
}

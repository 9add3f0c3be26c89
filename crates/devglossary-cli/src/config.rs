//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use devglossary_extractor::{ExtractorConfig, SelectionConfig};
use devglossary_github::GitHubConfig;
use devglossary_llm::AnthropicConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every section is optional; secrets never come from this file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File selection
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Batching, pacing and ranking
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Inference endpoint
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Repository host
    #[serde(default)]
    pub github: GitHubConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".devglossary").join("config.toml"))
    }

    /// `path` if given, otherwise the default location.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from `path` (or the default path); a missing file
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section that does not depend on secrets.
    pub fn validate(&self) -> Result<()> {
        self.selection
            .validate()
            .and_then(|_| self.extractor.validate())
            .map_err(CliError::Config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.extractor.batch_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.extractor.max_terms, 100);
    }

    #[test]
    fn test_partial_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[settings]\nformat = \"json\"\n\n[extractor]\nbatch_size = 5\n\n[anthropic]\nmodel = \"claude-3-haiku-20240307\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.extractor.batch_size, 5);
        assert_eq!(config.extractor.inter_batch_delay_ms, 2000);
        assert_eq!(config.anthropic.model, "claude-3-haiku-20240307");
        assert!(config.anthropic.api_key.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nbatch_size = 0\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.color = false;
        config.save(&path).unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert!(!reloaded.settings.color);
    }
}

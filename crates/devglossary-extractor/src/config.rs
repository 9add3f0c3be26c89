//! Configuration for file selection, batching, extraction and ranking

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which files of a repository listing are worth analyzing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Allowed file extensions, including the leading dot
    pub included_extensions: Vec<String>,

    /// Directory names excluded at any depth
    pub excluded_directories: Vec<String>,
}

impl Default for SelectionConfig {
    /// Source and documentation files, skipping dependency caches, VCS
    /// metadata, build/test/vendor output and public assets
    fn default() -> Self {
        let included_extensions = [
            ".js", ".ts", ".tsx", ".py", ".go", ".java", ".rb", ".php", ".c", ".cpp", ".h", ".cs",
            ".html", ".css", ".scss", ".less", ".sh", ".md", ".txt",
        ];
        let excluded_directories = [
            "node_modules", ".git", "dist", "build", "coverage", "test", "tests", "__tests__",
            "vendor", "public",
        ];

        Self {
            included_extensions: included_extensions.iter().map(|s| s.to_string()).collect(),
            excluded_directories: excluded_directories.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SelectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.included_extensions.is_empty() {
            return Err("included_extensions must not be empty".to_string());
        }
        if let Some(ext) = self.included_extensions.iter().find(|e| e.is_empty()) {
            return Err(format!("invalid extension '{}'", ext));
        }
        if let Some(dir) = self
            .excluded_directories
            .iter()
            .find(|d| d.is_empty() || d.contains('/'))
        {
            return Err(format!("invalid excluded directory '{}'", dir));
        }
        Ok(())
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Files per inference request
    pub batch_size: usize,

    /// Characters of each file included in a prompt before truncation
    pub max_file_chars: usize,

    /// Pause between consecutive batches (milliseconds)
    pub inter_batch_delay_ms: u64,

    /// Maximum time for a single inference call (seconds)
    pub request_timeout_secs: u64,

    /// Terms below this confidence are discarded
    pub min_confidence: f64,

    /// Maximum number of ranked terms returned
    pub max_terms: usize,

    /// Maximum heuristic hints collected per batch
    pub max_hints: usize,

    /// Maximum heuristic hints embedded into a prompt
    pub prompt_hints: usize,
}

impl ExtractorConfig {
    /// Get the inter-batch delay as a Duration
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.max_file_chars == 0 {
            return Err("max_file_chars must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence {} out of range [0.0, 1.0]",
                self.min_confidence
            ));
        }
        if self.max_terms == 0 {
            return Err("max_terms must be greater than 0".to_string());
        }
        if self.prompt_hints > self.max_hints {
            return Err("prompt_hints cannot exceed max_hints".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration: 20 files per batch, 3000 characters per file,
    /// 2 seconds between batches, confidence floor 0.3, top 100 terms
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_file_chars: 3000,
            inter_batch_delay_ms: 2000,
            request_timeout_secs: 120,
            min_confidence: 0.3,
            max_terms: 100,
            max_hints: 50,
            prompt_hints: 20,
        }
    }
}

impl ExtractorConfig {
    /// Conservative preset: smaller batches and longer pauses for low-tier API keys
    pub fn conservative() -> Self {
        Self {
            batch_size: 10,
            max_file_chars: 2000,
            inter_batch_delay_ms: 5000,
            request_timeout_secs: 180,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.inter_batch_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_conservative_config_is_valid() {
        let config = ExtractorConfig::conservative();
        assert!(config.validate().is_ok());
        assert!(config.batch_size < ExtractorConfig::default().batch_size);
    }

    #[test]
    fn test_invalid_batch_size() {
        let mut config = ExtractorConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_min_confidence() {
        let mut config = ExtractorConfig::default();
        config.min_confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prompt_hints_bounded_by_max_hints() {
        let mut config = ExtractorConfig::default();
        config.prompt_hints = config.max_hints + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.batch_size, parsed.batch_size);
        assert_eq!(config.max_file_chars, parsed.max_file_chars);
        assert_eq!(config.inter_batch_delay_ms, parsed.inter_batch_delay_ms);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed = ExtractorConfig::from_toml("batch_size = 5\n").unwrap();
        assert_eq!(parsed.batch_size, 5);
        assert_eq!(parsed.max_terms, 100);
    }

    #[test]
    fn test_default_selection_is_valid() {
        let config = SelectionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.included_extensions.contains(&".md".to_string()));
        assert!(config.excluded_directories.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_selection_rejects_nested_directory() {
        let config = SelectionConfig {
            excluded_directories: vec!["docs/generated".to_string()],
            ..SelectionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

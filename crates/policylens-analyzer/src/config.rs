//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default reference corpus directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default regulations named in the prompt's framing sentence
pub const DEFAULT_REGULATIONS: &str = "Vietnam's Decree 13, ISO, PCI-DSS";

/// Configuration for the Analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory holding the reference documents (read non-recursively)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Regulations named in the prompt, e.g. "GDPR, ISO 27001"
    #[serde(default = "default_regulations")]
    pub regulations: String,

    /// Abort the run when any reference file is unreadable, instead of
    /// continuing with the readable ones
    #[serde(default)]
    pub strict_references: bool,

    /// Reference files larger than this are treated as unreadable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reference_bytes: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_regulations() -> String {
    DEFAULT_REGULATIONS.to_string()
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }
        if self.regulations.trim().is_empty() {
            return Err("regulations must not be empty".to_string());
        }
        if self.max_reference_bytes == Some(0) {
            return Err("max_reference_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Default configuration reading references from another directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for AnalyzerConfig {
    /// Lenient defaults: `./data`, unreadable references skipped
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            regulations: default_regulations(),
            strict_references: false,
            max_reference_bytes: None,
        }
    }
}

impl AnalyzerConfig {
    /// Strict preset: any unreadable reference fails the run, and
    /// references above 50 MiB are refused
    pub fn strict() -> Self {
        Self {
            strict_references: true,
            max_reference_bytes: Some(50 * 1024 * 1024),
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
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(!config.strict_references);
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = AnalyzerConfig::strict();
        assert!(config.validate().is_ok());
        assert!(config.strict_references);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = AnalyzerConfig::default();
        config.regulations = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.max_reference_bytes = Some(0);
        assert!(config.validate().is_err());

        assert!(AnalyzerConfig::with_data_dir("").validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml(r#"data_dir = "/srv/regulations""#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/regulations"));
        assert_eq!(config.regulations, DEFAULT_REGULATIONS);
        assert_eq!(config.max_reference_bytes, None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = AnalyzerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}

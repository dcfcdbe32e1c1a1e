//! Configuration file parsing for the web shell.
//!
//! Loads settings from TOML files including bind address, upload limit,
//! the analyzer settings and the Gemini client settings. Every field has a
//! default, so an empty file is a valid configuration.

use policylens_analyzer::AnalyzerConfig;
use policylens_llm::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Web configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Web shell configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Reference corpus and prompt settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Remote model settings
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

/// 200 MiB
fn default_max_upload_bytes() -> usize {
    200 * 1024 * 1024
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_upload_bytes: default_max_upload_bytes(),
            analyzer: AnalyzerConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl WebConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: WebConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        self.analyzer
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("analyzer: {}", e)))?;
        self.gemini
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("gemini: {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

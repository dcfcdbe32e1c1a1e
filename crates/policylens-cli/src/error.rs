//! Error types for the CLI application.

use policylens_analyzer::AnalysisError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analysis failed or was refused
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Follow-up advice printed under the error, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Analysis(AnalysisError::MissingCredential) => {
                Some("Pass --api-key or set GEMINI_API_KEY.")
            }
            CliError::Analysis(AnalysisError::NoReferenceDocuments(_)) => {
                Some("Put .pdf, .docx or .txt regulations in the data directory or pass --data-dir.")
            }
            _ => None,
        }
    }
}

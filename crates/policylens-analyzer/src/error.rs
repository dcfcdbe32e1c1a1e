//! Error types for the Analyzer

use policylens_extractor::{CorpusError, ExtractorError};
use thiserror::Error;

/// Errors that end an analysis run.
///
/// Every variant's message is written for the person who triggered the run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No API key was supplied
    #[error("Please enter your Gemini API key.")]
    MissingCredential,

    /// No policy file was supplied
    #[error("Please upload a policy file.")]
    MissingDocument,

    /// The analysis client could not be set up
    #[error("Error configuring the analysis service: {0}")]
    Configuration(String),

    /// The policy file's suffix is not supported
    #[error("Unsupported file type for '{0}'. Upload a .pdf, .docx or .txt file.")]
    UnsupportedFormat(String),

    /// The policy file could not be read or held no text
    #[error("Could not read content from the uploaded file: {0}")]
    Extraction(#[source] ExtractorError),

    /// The reference directory could not be read
    #[error("{0}")]
    Corpus(#[from] CorpusError),

    /// The reference directory held no readable document
    #[error("No reference documents found or could not be read in {0}.")]
    NoReferenceDocuments(String),

    /// The remote generate call failed
    #[error("An error occurred while calling the analysis service: {0}")]
    Generation(String),

    /// Invalid analyzer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Run state machine was driven out of order
    #[error("Invalid run state: {0}")]
    InvalidState(String),
}

impl AnalysisError {
    /// True for missing inputs, which shells show as a prompt to the user
    /// rather than as a failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingCredential | AnalysisError::MissingDocument
        )
    }
}

impl From<ExtractorError> for AnalysisError {
    fn from(e: ExtractorError) -> Self {
        match e {
            ExtractorError::UnsupportedFormat { file_name } => {
                AnalysisError::UnsupportedFormat(file_name)
            }
            other => AnalysisError::Extraction(other),
        }
    }
}

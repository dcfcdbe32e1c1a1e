//! Error types for document extraction and corpus loading

use policylens_domain::DocumentFormat;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting text from one document
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The format parser rejected the content, or it held no text
    #[error("Error reading {format} file: {cause}")]
    Extraction {
        /// Format that was being parsed
        format: DocumentFormat,
        /// Parser or decoder message
        cause: String,
    },

    /// File name suffix is not one of the supported formats
    #[error("Unsupported file type for '{file_name}' (expected .pdf, .docx or .txt)")]
    UnsupportedFormat {
        /// Name as supplied
        file_name: String,
    },

    /// File exceeds the configured size ceiling
    #[error("File too large: {size} bytes (max: {limit})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured ceiling in bytes
        limit: u64,
    },

    /// Reading the file from disk failed
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ExtractorError {
    /// Build an [`ExtractorError::Extraction`] from any displayable cause
    pub fn extraction(format: DocumentFormat, cause: impl Display) -> Self {
        ExtractorError::Extraction {
            format,
            cause: cause.to_string(),
        }
    }
}

/// Errors that stop a whole reference corpus from loading
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The directory itself could not be listed
    #[error("Could not read reference documents in {}: {cause}", .path.display())]
    Read {
        /// Directory that was being listed
        path: PathBuf,
        /// Underlying cause
        cause: String,
    },

    /// A reference file failed while the loader runs in strict mode
    #[error("Reference document '{name}' could not be read: {source}")]
    Document {
        /// File name
        name: String,
        /// Extraction failure
        #[source]
        source: ExtractorError,
    },
}

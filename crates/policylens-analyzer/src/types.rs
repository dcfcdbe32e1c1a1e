//! Request and response types for an analysis run

use policylens_domain::{Credential, RunId, UploadedDocument};
use serde::{Deserialize, Serialize};

/// Inputs collected by a shell for one run
///
/// Either field may be absent; the analyzer turns absence into the matching
/// precondition error without touching anything else.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// API key for the remote service
    pub credential: Option<Credential>,

    /// The uploaded policy document
    pub document: Option<UploadedDocument>,
}

impl AnalysisRequest {
    /// Request with both inputs present
    pub fn new(credential: Credential, document: UploadedDocument) -> Self {
        Self {
            credential: Some(credential),
            document: Some(document),
        }
    }

    /// Build from raw shell inputs; a blank key counts as missing
    pub fn from_parts(api_key: Option<&str>, document: Option<UploadedDocument>) -> Self {
        Self {
            credential: api_key.and_then(Credential::new),
            document,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Run that produced this report
    pub run_id: RunId,

    /// Markdown returned by the model, unmodified
    pub markdown: String,

    /// Metadata about the run
    pub metadata: AnalysisMetadata,
}

/// A reference file that was left out of the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReference {
    /// File name
    pub name: String,

    /// Why it could not be read
    pub reason: String,
}

/// Metadata about an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Name of the analyzed policy file
    pub policy_file: String,

    /// Model that produced the analysis
    pub model: String,

    /// Reference documents included in the prompt, in prompt order
    pub references: Vec<String>,

    /// Reference files that were skipped
    pub skipped_references: Vec<SkippedReference>,

    /// Characters of extracted policy text
    pub policy_chars: usize,

    /// Bytes in the assembled prompt
    pub prompt_bytes: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

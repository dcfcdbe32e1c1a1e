//! PolicyLens Analyzer
//!
//! Checks a privacy policy against a directory of reference regulations
//! using a remote generative model.
//!
//! # Overview
//!
//! One run takes an uploaded policy document and the user's API key, and
//! produces a Markdown report with a summary, a compliance analysis,
//! improvement suggestions and a rating out of 10.
//!
//! # Architecture
//!
//! ```text
//! AnalysisRequest → preconditions → configure provider
//!     → extract policy → load references → PromptBuilder → LLM → AnalysisReport
//! ```
//!
//! Progress messages go to a [`RunObserver`](policylens_domain::RunObserver)
//! owned by the shell. Failures come back as [`AnalysisError`] values.
//!
//! # Example Usage
//!
//! ```no_run
//! use policylens_analyzer::{Analyzer, AnalyzerConfig, AnalysisRequest};
//! use policylens_domain::{Credential, NullObserver, UploadedDocument};
//! use policylens_llm::MockFactory;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(AnalyzerConfig::with_data_dir("data"))?;
//! let factory = MockFactory::new("## Summary\n...");
//!
//! let request = AnalysisRequest::new(
//!     Credential::new("my-key").ok_or("blank key")?,
//!     UploadedDocument::new("policy.txt", b"We store emails.".to_vec()),
//! );
//!
//! let report = analyzer.run(request, &factory, &NullObserver)?;
//! println!("{}", report.markdown);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod prompt;
mod types;


pub use analyzer::{Analyzer, PROCESSING_STATUS};
pub use config::{AnalyzerConfig, DEFAULT_DATA_DIR, DEFAULT_REGULATIONS};
pub use error::AnalysisError;
pub use prompt::PromptBuilder;
pub use types::{AnalysisMetadata, AnalysisReport, AnalysisRequest, SkippedReference};

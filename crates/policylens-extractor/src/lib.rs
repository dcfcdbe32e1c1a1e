//! PolicyLens Extractor
//!
//! Turns policy and reference documents into plain text.
//!
//! # Overview
//!
//! Two entry points:
//!
//! - **Document extraction**: [`extract`], [`extract_upload`] and
//!   [`extract_file`] convert a PDF, DOCX or UTF-8 text document into one
//!   string, or return an [`ExtractorError`] describing why they could not.
//! - **Reference corpus loading**: [`CorpusLoader`] scans a directory
//!   (non-recursively), extracts every supported file and returns a
//!   [`ReferenceCorpus`](policylens_domain::ReferenceCorpus).
//!
//! # Architecture
//!
//! ```text
//! bytes + format → {pdf, docx, text} → non-empty check → String
//! directory → sorted supported files → extract each → ReferenceCorpus
//! ```
//!
//! Nothing here panics on malformed input and nothing writes state; the
//! caller decides how to render a failure.
//!
//! # Example Usage
//!
//! ```
//! use policylens_domain::{DocumentFormat, UploadedDocument};
//! use policylens_extractor::{extract, extract_upload};
//!
//! let text = extract(b"We store emails.", DocumentFormat::Txt).unwrap();
//! assert_eq!(text, "We store emails.");
//!
//! let upload = UploadedDocument::new("policy.odt", b"...".to_vec());
//! assert!(extract_upload(&upload).is_err());
//! ```

#![warn(missing_docs)]

mod corpus;
mod docx;
mod error;
mod extract;
mod pdf;
mod text;

#[cfg(test)]
mod fixtures;

pub use corpus::{load_corpus, CorpusLoader};
pub use error::{CorpusError, ExtractorError};
pub use extract::{extract, extract_file, extract_upload};

//! Uploaded policy documents and user credentials

use crate::format::DocumentFormat;
use std::fmt;

/// A file handed over by the presentation shell for one analysis run.
///
/// The name is only used to derive a [`DocumentFormat`] and to label log
/// lines; the bytes are consumed once by the extractor.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new upload from its original file name and raw content
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Original file name as supplied by the user
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw content
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the content in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the upload carries no bytes at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Format derived from the file name, if supported
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_file_name(&self.file_name)
    }
}

// Content can be megabytes of binary; keep Debug output readable.
impl fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// API key for the remote generative service.
///
/// Never printed: both `Debug` and `Display` redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, rejecting blank input.
    ///
    /// Surrounding whitespace (a common copy/paste artifact) is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use policylens_domain::Credential;
    ///
    /// assert!(Credential::new("  ").is_none());
    /// let key = Credential::new(" abc123 ").unwrap();
    /// assert_eq!(key.expose(), "abc123");
    /// assert_eq!(format!("{:?}", key), "Credential(***)");
    /// ```
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let trimmed = key.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for building the outbound request only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

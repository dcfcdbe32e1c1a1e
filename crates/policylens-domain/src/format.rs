//! Supported document formats

use std::fmt;
use std::path::Path;

/// A document format the extractor knows how to read.
///
/// The format of a file is derived from its suffix only; content sniffing is
/// never attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Office Open XML word-processing document (`.docx`)
    Docx,
    /// UTF-8 plain text (`.txt`)
    Txt,
}

impl DocumentFormat {
    /// Parse a bare extension such as `"pdf"` or `"DOCX"`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Derive the format from a file name's suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use policylens_domain::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_file_name("policy.PDF"), Some(DocumentFormat::Pdf));
    /// assert_eq!(DocumentFormat::from_file_name("notes.md"), None);
    /// assert_eq!(DocumentFormat::from_file_name("README"), None);
    /// ```
    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        };
        f.write_str(label)
    }
}

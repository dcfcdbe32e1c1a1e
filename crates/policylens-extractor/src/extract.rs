//! Format dispatch for single documents

use crate::docx::extract_docx;
use crate::error::ExtractorError;
use crate::pdf::extract_pdf;
use crate::text::extract_txt;
use policylens_domain::{DocumentFormat, UploadedDocument};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extract text from bytes in a known format.
///
/// Text that is empty or whitespace-only after decoding is reported as an
/// extraction failure, so a caller never receives an empty document.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractorError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::Txt => extract_txt(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractorError::extraction(format, "no extractable text found"));
    }

    Ok(text)
}

/// Extract text from an uploaded document, dispatching on its file name
pub fn extract_upload(document: &UploadedDocument) -> Result<String, ExtractorError> {
    let format = document
        .format()
        .ok_or_else(|| ExtractorError::UnsupportedFormat {
            file_name: document.file_name().to_string(),
        })?;

    debug!(
        "Extracting upload '{}' as {} ({} bytes)",
        document.file_name(),
        format,
        document.len()
    );
    extract(document.bytes(), format)
}

/// Read a file from disk and extract its text, dispatching on its suffix
pub fn extract_file(path: impl AsRef<Path>) -> Result<String, ExtractorError> {
    let path = path.as_ref();
    let format = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(DocumentFormat::from_file_name)
        .ok_or_else(|| ExtractorError::UnsupportedFormat {
            file_name: path.display().to_string(),
        })?;

    extract_path(path, format, None)
}

/// Read and extract a file whose format is already known, honouring an
/// optional size ceiling
pub(crate) fn extract_path(
    path: &Path,
    format: DocumentFormat,
    max_bytes: Option<u64>,
) -> Result<String, ExtractorError> {
    let io_error = |source| ExtractorError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(limit) = max_bytes {
        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > limit {
            return Err(ExtractorError::TooLarge { size, limit });
        }
    }

    let bytes = fs::read(path).map_err(io_error)?;
    extract(&bytes, format)
}

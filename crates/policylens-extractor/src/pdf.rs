//! PDF text extraction
//!
//! Wraps the `pdf-extract` crate. Pages are decoded in page order and their
//! text concatenated. The parser is known to panic on some malformed files,
//! so every call runs under `catch_unwind` and a panic becomes an ordinary
//! extraction error.

use crate::error::ExtractorError;
use policylens_domain::DocumentFormat;
use std::any::Any;
use std::panic;
use tracing::debug;

/// Extract the text of every page, in page order
pub(crate) fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractorError> {
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match outcome {
        Ok(Ok(text)) => {
            debug!("Decoded PDF: {} bytes in, {} chars out", bytes.len(), text.len());
            Ok(text)
        }
        Ok(Err(e)) => Err(ExtractorError::extraction(DocumentFormat::Pdf, e)),
        Err(payload) => Err(ExtractorError::extraction(
            DocumentFormat::Pdf,
            format!("parser aborted: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

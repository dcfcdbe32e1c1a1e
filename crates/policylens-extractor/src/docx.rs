//! DOCX text extraction
//!
//! A DOCX file is a ZIP container; the body lives in `word/document.xml`.
//! Each paragraph (`w:p`) contributes the text of its `w:t` runs followed by
//! a newline, in document order. Tabs and breaks inside runs are kept as
//! `\t` and `\n`.

use crate::error::ExtractorError;
use policylens_domain::DocumentFormat;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a DOCX container
pub(crate) fn extract_docx(bytes: &[u8]) -> Result<String, ExtractorError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| docx_error(format!("not a valid DOCX container: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| docx_error(format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(format!("could not read {}: {}", DOCUMENT_PART, e)))?;

    let text = paragraphs_to_text(&xml)?;
    debug!("Decoded DOCX: {} bytes of XML, {} chars out", xml.len(), text.len());
    Ok(text)
}

/// Walk `word/document.xml` and join paragraphs.
///
/// Paragraphs can nest (text boxes live inside runs of an outer
/// paragraph), so open paragraphs are kept on a stack and each one is
/// emitted when it closes.
fn paragraphs_to_text(xml: &str) -> Result<String, ExtractorError> {
    let mut reader = Reader::from_str(xml);
    let mut output = String::new();
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" => output.push('\n'),
                // `w:tab` also appears in paragraph properties as a tab stop
                b"tab" if run_depth > 0 => push_to_current(&mut open, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_to_current(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| docx_error(format!("invalid text content: {}", e)))?;
                push_to_current(&mut open, &text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        output.push_str(&paragraph);
                        output.push('\n');
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(docx_error(format!(
                    "malformed document XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(output)
}

fn push_to_current(open: &mut [String], text: &str) {
    if let Some(current) = open.last_mut() {
        current.push_str(text);
    }
}

fn docx_error(cause: String) -> ExtractorError {
    ExtractorError::extraction(DocumentFormat::Docx, cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{docx_from_document_xml, docx_with_paragraphs, wrap_body};

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let bytes = docx_with_paragraphs(&["Privacy Policy", "We store emails."]);
        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "Privacy Policy\nWe store emails.\n");
    }

    #[test]
    fn test_runs_concatenate_within_paragraph() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>Data </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>controller</w:t></w:r></w:p>"#,
        );
        let text = extract_docx(&docx_from_document_xml(&xml)).unwrap();
        assert_eq!(text, "Data controller\n");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let bytes = docx_with_paragraphs(&["Terms & <Conditions>"]);
        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "Terms & <Conditions>\n");
    }

    #[test]
    fn test_tabs_breaks_and_tab_stops() {
        let xml = wrap_body(concat!(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>"#,
            r#"<w:r><w:t>Art.1</w:t><w:tab/><w:t>Consent</w:t><w:br/><w:t>required</w:t></w:r></w:p>"#,
        ));
        let text = extract_docx(&docx_from_document_xml(&xml)).unwrap();
        assert_eq!(text, "Art.1\tConsent\nrequired\n");
    }

    #[test]
    fn test_empty_paragraph_keeps_line() {
        let xml = wrap_body(r#"<w:p><w:r><w:t>A</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>B</w:t></w:r></w:p>"#);
        let text = extract_docx(&docx_from_document_xml(&xml)).unwrap();
        assert_eq!(text, "A\n\nB\n");
    }

    #[test]
    fn test_instruction_text_is_ignored() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:instrText>PAGE \* MERGEFORMAT</w:instrText></w:r><w:r><w:t>Visible</w:t></w:r></w:p>"#,
        );
        let text = extract_docx(&docx_from_document_xml(&xml)).unwrap();
        assert_eq!(text, "Visible\n");
    }

    #[test]
    fn test_not_a_zip() {
        let err = extract_docx(b"plain bytes").unwrap_err();
        assert!(err.to_string().contains("not a valid DOCX container"));
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = crate::fixtures::zip_with_entries(&[("word/styles.xml", "<styles/>")]);
        let err = extract_docx(&bytes).unwrap_err();
        assert!(err.to_string().contains("missing word/document.xml"));
    }

    #[test]
    fn test_malformed_xml() {
        let bytes = docx_from_document_xml("<w:document><w:body><w:p></w:body>");
        let err = extract_docx(&bytes).unwrap_err();
        assert!(matches!(
            err,
            ExtractorError::Extraction { format: DocumentFormat::Docx, .. }
        ));
    }
}

//! UTF-8 plain text decoding

use crate::error::ExtractorError;
use policylens_domain::DocumentFormat;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw bytes as UTF-8, dropping a leading byte-order mark
pub(crate) fn extract_txt(bytes: &[u8]) -> Result<String, ExtractorError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ExtractorError::extraction(DocumentFormat::Txt, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        assert_eq!(extract_txt("Điều 1: đồng ý".as_bytes()).unwrap(), "Điều 1: đồng ý");
    }

    #[test]
    fn test_bom_is_dropped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"Art.1");
        assert_eq!(extract_txt(&bytes).unwrap(), "Art.1");
    }

    #[test]
    fn test_invalid_utf8() {
        let err = extract_txt(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        match err {
            ExtractorError::Extraction { format, cause } => {
                assert_eq!(format, DocumentFormat::Txt);
                assert!(cause.contains("utf-8") || cause.contains("UTF-8"));
            }
            other => panic!("Expected Extraction error, got {:?}", other),
        }
    }
}

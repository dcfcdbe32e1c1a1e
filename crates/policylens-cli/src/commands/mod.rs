//! Command implementations.

pub mod analyze;
pub mod config;
pub mod prompt;
pub mod references;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::prompt::execute_prompt;
pub use self::references::execute_references;

use crate::error::{CliError, Result};
use policylens_domain::UploadedDocument;
use std::fs;
use std::path::Path;

/// Read a policy file from disk as an upload named after the file.
pub(crate) fn read_document(path: &Path) -> Result<UploadedDocument> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", path.display())))?;
    let bytes = fs::read(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(UploadedDocument::new(file_name, bytes))
}

/// Print to stdout, or write to `output` when given.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            Ok(())
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_document_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Policy.TXT");
        fs::write(&path, "We store emails.").unwrap();

        let document = read_document(&path).unwrap();
        assert_eq!(document.file_name(), "Policy.TXT");
        assert_eq!(document.bytes(), b"We store emails.");
    }

    #[test]
    fn test_read_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(&dir.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(ref msg) if msg.starts_with("Cannot read")));
    }
}

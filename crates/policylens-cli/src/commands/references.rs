//! References command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::{ConsoleObserver, Formatter};
use policylens_analyzer::Analyzer;
use policylens_domain::{ReferenceCorpus, RunObserver};

/// Execute the references command.
pub fn execute_references(config: &Config, formatter: &Formatter) -> Result<()> {
    let observer = ConsoleObserver::new(formatter);
    let corpus = scan(config, &observer)?;
    println!("{}", formatter.format_references(&corpus)?);
    Ok(())
}

/// Scan the configured directory leniently, so unreadable files are listed
/// next to readable ones and an empty directory is not an error.
pub fn scan(config: &Config, observer: &dyn RunObserver) -> Result<ReferenceCorpus> {
    let mut analyzer_config = config.analyzer.clone();
    analyzer_config.strict_references = false;
    let analyzer = Analyzer::new(analyzer_config)?;
    Ok(analyzer.scan_references(observer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use policylens_analyzer::AnalysisError;
    use policylens_domain::NullObserver;
    use std::fs;

    #[test]
    fn test_scan_lists_readable_and_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("decree13.txt"), "Art.1").unwrap();
        fs::write(dir.path().join("broken.docx"), "not a zip").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let mut config = Config::default();
        config.analyzer.data_dir = dir.path().to_path_buf();
        config.analyzer.strict_references = true;

        let corpus = scan(&config, &NullObserver).unwrap();
        assert_eq!(corpus.names(), vec!["decree13.txt"]);
        assert_eq!(corpus.failures().len(), 1);
        assert_eq!(corpus.failures()[0].name, "broken.docx");
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.analyzer.data_dir = dir.path().to_path_buf();

        assert!(scan(&config, &NullObserver).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.analyzer.data_dir = dir.path().join("absent");

        let err = scan(&config, &NullObserver).unwrap_err();
        assert!(matches!(err, CliError::Analysis(AnalysisError::Corpus(_))));
    }
}

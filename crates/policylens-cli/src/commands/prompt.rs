//! Prompt command implementation.

use super::{emit, read_document};
use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{ConsoleObserver, Formatter};
use policylens_analyzer::Analyzer;
use policylens_domain::{Prompt, RunObserver};
use std::path::Path;

/// Execute the prompt command: extract, assemble, print. No API key needed.
pub fn execute_prompt(args: PromptArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let observer = ConsoleObserver::new(formatter);
    let prompt = build_prompt(&args.file, config, &observer)?;
    emit(&formatter.format_prompt(&prompt)?, args.output.as_deref())
}

/// Assemble the prompt an analysis of `file` would send.
pub fn build_prompt(file: &Path, config: &Config, observer: &dyn RunObserver) -> Result<Prompt> {
    let analyzer = Analyzer::new(config.analyzer.clone())?;
    let document = read_document(file)?;
    Ok(analyzer.preview_prompt(&document, observer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use policylens_analyzer::AnalysisError;
    use policylens_domain::NullObserver;
    use std::fs;

    #[test]
    fn test_prompt_contains_policy_and_reference() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("decree13.txt"), "Art.1: consent required.").unwrap();
        let policy = dir.path().join("policy.txt");
        fs::write(&policy, "We store emails.").unwrap();

        let mut config = Config::default();
        config.analyzer.data_dir = data;

        let text = build_prompt(&policy, &config, &NullObserver).unwrap().text();
        assert!(text.starts_with("YOU ARE AN EXPERT IN DATA PRIVACY POLICY ANALYSIS."));
        assert!(text.contains("We store emails."));
        assert!(text.contains(
            "--- Start of decree13.txt ---\nArt.1: consent required.\n--- End of decree13.txt ---"
        ));
    }

    #[test]
    fn test_prompt_needs_references() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.txt");
        fs::write(&policy, "We store emails.").unwrap();

        let mut config = Config::default();
        config.analyzer.data_dir = dir.path().join("empty");
        fs::create_dir(&config.analyzer.data_dir).unwrap();

        let err = build_prompt(&policy, &config, &NullObserver).unwrap_err();
        assert!(matches!(
            err,
            CliError::Analysis(AnalysisError::NoReferenceDocuments(_))
        ));
    }
}

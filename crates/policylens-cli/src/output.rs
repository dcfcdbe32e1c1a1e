//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use policylens_analyzer::AnalysisReport;
use policylens_domain::{Prompt, ReferenceCorpus, RunObserver};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a finished analysis.
    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "run_id": report.run_id.to_string(),
                    "markdown": report.markdown,
                    "metadata": report.metadata,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Text => {
                let meta = &report.metadata;
                let mut out = String::new();
                out.push_str(&self.colorize("Analysis Results", "cyan"));
                out.push_str("\n\n");
                out.push_str(&report.markdown);
                if !report.markdown.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "{} analyzed by {} against {} reference document(s) in {} ms",
                    meta.policy_file,
                    meta.model,
                    meta.references.len(),
                    meta.processing_time_ms
                )));
                Ok(out)
            }
        }
    }

    /// Format the loaded reference corpus.
    pub fn format_references(&self, corpus: &ReferenceCorpus) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let documents: Vec<serde_json::Value> = corpus
                    .documents()
                    .iter()
                    .map(|d| serde_json::json!({ "name": d.name, "chars": d.text.chars().count() }))
                    .collect();
                let failures: Vec<serde_json::Value> = corpus
                    .failures()
                    .iter()
                    .map(|f| serde_json::json!({ "name": f.name, "reason": f.reason }))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "documents": documents,
                    "failures": failures,
                }))?)
            }
            OutputFormat::Text => {
                if corpus.is_empty() && corpus.failures().is_empty() {
                    return Ok(self.colorize("No reference documents found.", "yellow"));
                }
                let mut lines = Vec::new();
                for document in corpus.documents() {
                    lines.push(format!(
                        "{}  ({} chars)",
                        document.name,
                        document.text.chars().count()
                    ));
                }
                for failure in corpus.failures() {
                    lines.push(self.warning(&format!("{}: {}", failure.name, failure.reason)));
                }
                lines.push(self.success(&format!(
                    "{} readable, {} unreadable",
                    corpus.len(),
                    corpus.failures().len()
                )));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format an assembled prompt.
    pub fn format_prompt(&self, prompt: &Prompt) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "parts": prompt.parts(),
                "bytes": prompt.len(),
            }))?),
            OutputFormat::Text => Ok(prompt.text()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Prints run progress to stderr, keeping stdout for the report
pub struct ConsoleObserver<'a> {
    formatter: &'a Formatter,
}

impl<'a> ConsoleObserver<'a> {
    /// Observer printing through `formatter`
    pub fn new(formatter: &'a Formatter) -> Self {
        Self { formatter }
    }
}

impl RunObserver for ConsoleObserver<'_> {
    fn status(&self, message: &str) {
        eprintln!("{}", self.formatter.info(message));
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", self.formatter.warning(message));
    }
}

//! Analyze command implementation.

use super::{emit, read_document};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{ConsoleObserver, Formatter};
use policylens_analyzer::{AnalysisReport, AnalysisRequest, Analyzer};
use policylens_domain::{LlmProvider, ProviderFactory, RunObserver};
use policylens_llm::GeminiFactory;
use std::fmt::Display;

/// Execute the analyze command against the Gemini API.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut gemini = config.gemini.clone();
    if let Some(model) = &args.model {
        gemini.model = model.clone();
    }
    let factory = GeminiFactory::new(gemini);
    let observer = ConsoleObserver::new(formatter);

    let report = run_analysis(&args, config, &factory, &observer)?;

    let rendered = formatter.format_report(&report)?;
    emit(&rendered, args.output.as_deref())?;
    if let Some(path) = &args.output {
        eprintln!(
            "{}",
            formatter.success(&format!("Report written to {}", path.display()))
        );
    }
    Ok(())
}

/// Run one analysis with the given factory.
///
/// A missing API key is reported before the policy file is even read.
pub fn run_analysis<F>(
    args: &AnalyzeArgs,
    config: &Config,
    factory: &F,
    observer: &dyn RunObserver,
) -> Result<AnalysisReport>
where
    F: ProviderFactory,
    F::Error: Display,
    <F::Provider as LlmProvider>::Error: Display,
{
    let mut analyzer_config = config.analyzer.clone();
    if args.strict {
        analyzer_config.strict_references = true;
    }
    let analyzer = Analyzer::new(analyzer_config)?;

    let document = match args.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Some(read_document(&args.file)?),
        _ => None,
    };
    let request = AnalysisRequest::from_parts(args.api_key.as_deref(), document);

    Ok(analyzer.run(request, factory, observer)?)
}

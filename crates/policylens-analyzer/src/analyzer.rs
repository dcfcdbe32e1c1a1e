//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::prompt::PromptBuilder;
use crate::types::{AnalysisMetadata, AnalysisReport, AnalysisRequest, SkippedReference};
use policylens_domain::{
    AnalysisRun, Credential, LlmProvider, Prompt, ProviderFactory, ReferenceCorpus, RunObserver,
    UploadedDocument,
};
use policylens_extractor::{extract_upload, CorpusLoader};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// Status shown while the policy and references are read
pub const PROCESSING_STATUS: &str = "Processing... Please wait a moment.";

/// The Analyzer runs one policy document through extraction, prompt
/// assembly and the remote model
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    loader: CorpusLoader,
}

impl Analyzer {
    /// Create a new Analyzer, rejecting invalid configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate().map_err(AnalysisError::Config)?;
        let loader = CorpusLoader::new()
            .strict(config.strict_references)
            .with_max_file_bytes(config.max_reference_bytes);
        Ok(Self { config, loader })
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Read the reference directory as it is, even if nothing is readable
    pub fn scan_references(
        &self,
        observer: &dyn RunObserver,
    ) -> Result<ReferenceCorpus, AnalysisError> {
        Ok(self.loader.load(&self.config.data_dir, observer)?)
    }

    /// Load the reference corpus; an empty one is an error
    pub fn load_references(
        &self,
        observer: &dyn RunObserver,
    ) -> Result<ReferenceCorpus, AnalysisError> {
        let corpus = self.scan_references(observer)?;
        if corpus.is_empty() {
            return Err(AnalysisError::NoReferenceDocuments(
                self.config.data_dir.display().to_string(),
            ));
        }
        Ok(corpus)
    }

    /// Assemble the prompt for an already extracted policy
    pub fn build_prompt(&self, policy_text: &str, corpus: &ReferenceCorpus) -> Prompt {
        PromptBuilder::new(policy_text, corpus)
            .with_regulations(self.config.regulations.clone())
            .build()
    }

    /// Extract a policy and assemble its prompt without contacting the model
    pub fn preview_prompt(
        &self,
        document: &UploadedDocument,
        observer: &dyn RunObserver,
    ) -> Result<Prompt, AnalysisError> {
        let policy_text = extract_upload(document)?;
        let corpus = self.load_references(observer)?;
        Ok(self.build_prompt(&policy_text, &corpus))
    }

    /// Run a full analysis
    ///
    /// Missing inputs are rejected before the factory is consulted, so an
    /// incomplete request never reaches the remote service. The model's
    /// answer is returned unmodified.
    pub fn run<F>(
        &self,
        request: AnalysisRequest,
        factory: &F,
        observer: &dyn RunObserver,
    ) -> Result<AnalysisReport, AnalysisError>
    where
        F: ProviderFactory,
        F::Error: Display,
        <F::Provider as LlmProvider>::Error: Display,
    {
        let (credential, document) = match (request.credential, request.document) {
            (None, _) => return Err(AnalysisError::MissingCredential),
            (_, None) => return Err(AnalysisError::MissingDocument),
            (Some(credential), Some(document)) => (credential, document),
        };

        let mut run = AnalysisRun::new();
        let span = info_span!("analysis", run_id = %run.id());
        let _guard = span.enter();

        run.start().map_err(AnalysisError::InvalidState)?;
        info!(
            "Starting analysis of '{}' ({} bytes)",
            document.file_name(),
            document.len()
        );
        let start_time = Instant::now();

        let outcome = self.execute(&credential, &document, factory, observer);

        let transition = match &outcome {
            Ok(_) => run.succeed(),
            Err(e) => {
                warn!("Analysis failed: {}", e);
                run.fail(e.to_string())
            }
        };
        transition.map_err(AnalysisError::InvalidState)?;

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Run {} in {}ms", run.state(), processing_time_ms);

        let (markdown, mut metadata) = outcome?;
        metadata.processing_time_ms = processing_time_ms;

        Ok(AnalysisReport {
            run_id: run.id(),
            markdown,
            metadata,
        })
    }

    fn execute<F>(
        &self,
        credential: &Credential,
        document: &UploadedDocument,
        factory: &F,
        observer: &dyn RunObserver,
    ) -> Result<(String, AnalysisMetadata), AnalysisError>
    where
        F: ProviderFactory,
        F::Error: Display,
        <F::Provider as LlmProvider>::Error: Display,
    {
        let provider = factory
            .configure(credential)
            .map_err(|e| AnalysisError::Configuration(e.to_string()))?;

        observer.status(PROCESSING_STATUS);

        let policy_text = extract_upload(document)?;
        debug!("Extracted {} chars of policy text", policy_text.len());

        let corpus = self.load_references(observer)?;
        let prompt = self.build_prompt(&policy_text, &corpus);
        let prompt_bytes = prompt.len();
        debug!(
            "Prompt assembled: {} bytes, {} reference documents",
            prompt_bytes,
            corpus.len()
        );

        observer.status(&format!(
            "Sending request to {}... This may take a moment.",
            provider.model_name()
        ));

        let markdown = provider
            .generate(&prompt)
            .map_err(|e| AnalysisError::Generation(e.to_string()))?;

        debug!("Model response length: {} chars", markdown.len());

        let metadata = AnalysisMetadata {
            policy_file: document.file_name().to_string(),
            model: provider.model_name().to_string(),
            references: corpus.names().into_iter().map(str::to_string).collect(),
            skipped_references: corpus
                .failures()
                .iter()
                .map(|f| SkippedReference {
                    name: f.name.clone(),
                    reason: f.reason.clone(),
                })
                .collect(),
            policy_chars: policy_text.chars().count(),
            prompt_bytes,
            processing_time_ms: 0,
        };

        Ok((markdown, metadata))
    }
}

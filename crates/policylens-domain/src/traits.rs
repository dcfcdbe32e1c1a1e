//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::document::Credential;
use crate::prompt::Prompt;

/// Trait for generative text providers
///
/// Implemented by the infrastructure layer (policylens-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Model identifier used for generation
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt (single, non-streaming call)
    fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error>;
}

/// Trait for configuring a provider from a user-supplied credential
///
/// Each run asks the factory for its own provider; nothing about the
/// credential is kept in process-wide state.
pub trait ProviderFactory {
    /// Provider produced by this factory
    type Provider: LlmProvider;

    /// Error type for configuration failures
    type Error;

    /// Build a provider bound to the credential
    fn configure(&self, credential: &Credential) -> Result<Self::Provider, Self::Error>;
}

/// Sink for informational status messages emitted during a run
///
/// Owned by the presentation shell. Errors are not reported here; they are
/// returned as values.
pub trait RunObserver {
    /// Progress message, e.g. "Reading reference file: decree13.pdf"
    fn status(&self, message: &str);

    /// Non-fatal problem worth showing to the user
    fn warning(&self, message: &str) {
        self.status(message);
    }
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn status(&self, _message: &str) {}
}

impl<T: RunObserver + ?Sized> RunObserver for &T {
    fn status(&self, message: &str) {
        (**self).status(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }
}

//! PolicyLens LLM Provider Layer
//!
//! Implementations of the `LlmProvider` and `ProviderFactory` traits from
//! `policylens-domain`.
//!
//! # Providers
//!
//! - `GeminiProvider`: Google Gemini `generateContent` REST API
//! - `MockProvider`: Deterministic mock for testing
//!
//! Providers are never global: a factory builds a fresh provider (and HTTP
//! client) for every run from an explicit configuration and the user's
//! credential.
//!
//! # Examples
//!
//! ```
//! use policylens_domain::{Credential, LlmProvider, Prompt, ProviderFactory};
//! use policylens_llm::MockFactory;
//!
//! let factory = MockFactory::new("## Summary\n...");
//! let key = Credential::new("test-key").unwrap();
//! let provider = factory.configure(&key).unwrap();
//! let result = provider.generate(&Prompt::from("test prompt")).unwrap();
//! assert_eq!(result, "## Summary\n...");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use policylens_domain::{Credential, LlmProvider, Prompt, ProviderFactory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiFactory, GeminiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Client could not be configured (bad credential, bad settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Service rejected the credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Quota or rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Prompt or response blocked by the service's content policy
    #[error("Content blocked: {0}")]
    Blocked(String),

    /// Service returned an error status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether the error happened while configuring the client rather than
    /// during generation
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::Configuration(_))
    }
}

const MOCK_MODEL: &str = "mock-model";
const ERROR_MARKER: &str = "ERROR";

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Clones share their state, so a test can keep a handle while the pipeline
/// owns another.
///
/// # Examples
///
/// ```
/// use policylens_domain::{LlmProvider, Prompt};
/// use policylens_llm::MockProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate(&Prompt::from("any prompt")).unwrap(), "Fixed response");
///
/// // Responses keyed by prompt text
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate(&Prompt::from("prompt1")).unwrap(), "response1");
/// assert_eq!(provider.last_prompt().unwrap(), "prompt1");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt text
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        locked(&self.responses).insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt text
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        locked(&self.responses).insert(prompt.into(), ERROR_MARKER.to_string());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *locked(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *locked(&self.call_count) = 0;
    }

    /// Text of the most recent prompt
    pub fn last_prompt(&self) -> Option<String> {
        locked(&self.last_prompt).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        MOCK_MODEL
    }

    fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        *locked(&self.call_count) += 1;

        let text = prompt.text();
        *locked(&self.last_prompt) = Some(text.clone());

        if let Some(response) = locked(&self.responses).get(&text) {
            if response == ERROR_MARKER {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

/// Factory handing out [`MockProvider`]s that share one state
///
/// Counts how often it was asked to configure a provider and can be told to
/// fail configuration, so tests can assert that a run never reached the
/// service.
#[derive(Debug, Clone)]
pub struct MockFactory {
    provider: MockProvider,
    configure_count: Arc<Mutex<usize>>,
    configure_error: Option<String>,
}

impl MockFactory {
    /// Factory whose providers always answer `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_provider(MockProvider::new(response))
    }

    /// Factory handing out clones of `provider`
    pub fn with_provider(provider: MockProvider) -> Self {
        Self {
            provider,
            configure_count: Arc::new(Mutex::new(0)),
            configure_error: None,
        }
    }

    /// Make every `configure` call fail with the message
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.configure_error = Some(message.into());
        self
    }

    /// Handle on the shared provider state
    pub fn provider(&self) -> &MockProvider {
        &self.provider
    }

    /// Number of `configure` calls so far
    pub fn configure_count(&self) -> usize {
        *locked(&self.configure_count)
    }
}

impl ProviderFactory for MockFactory {
    type Provider = MockProvider;
    type Error = LlmError;

    fn configure(&self, _credential: &Credential) -> Result<Self::Provider, Self::Error> {
        *locked(&self.configure_count) += 1;
        match &self.configure_error {
            Some(message) => Err(LlmError::Configuration(message.clone())),
            None => Ok(self.provider.clone()),
        }
    }
}

//! Gemini Provider Implementation
//!
//! Talks to Google's Gemini `generateContent` REST endpoint.
//!
//! # Behaviour
//!
//! - One non-streaming request per [`LlmProvider::generate`] call
//! - The prompt parts are sent as the parts of a single user turn
//! - No retries and no backoff: a failure is returned to the caller as is
//! - No timeout unless `timeout_secs` is configured
//!
//! # Examples
//!
//! ```no_run
//! use policylens_domain::{Credential, LlmProvider, Prompt, ProviderFactory};
//! use policylens_llm::{GeminiConfig, GeminiFactory};
//!
//! let factory = GeminiFactory::new(GeminiConfig::default());
//! let key = Credential::new("AIza...").unwrap();
//! let provider = factory.configure(&key)?;
//! let text = provider.generate(&Prompt::from("Say hello"))?;
//! # Ok::<(), policylens_llm::LlmError>(())
//! ```

use crate::LlmError;
use policylens_domain::{Credential, LlmProvider, Prompt, ProviderFactory};
use reqwest::blocking::Client;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Settings for the Gemini client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the API (scheme and host, no path)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier, e.g. `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds; `None` waits for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Default settings with a different model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "endpoint must start with http:// or https:// (got '{}')",
                self.endpoint
            ));
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.model.contains('/') {
            return Err(format!("model must be a bare identifier (got '{}')", self.model));
        }
        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Builds one [`GeminiProvider`] per run
#[derive(Debug, Clone, Default)]
pub struct GeminiFactory {
    config: GeminiConfig,
}

impl GeminiFactory {
    /// Create a factory from explicit settings
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }
}

impl ProviderFactory for GeminiFactory {
    type Provider = GeminiProvider;
    type Error = LlmError;

    fn configure(&self, credential: &Credential) -> Result<Self::Provider, Self::Error> {
        GeminiProvider::new(self.config.clone(), credential.clone())
    }
}

/// Gemini API provider
pub struct GeminiProvider {
    config: GeminiConfig,
    credential: Credential,
    client: Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

/// Request body for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response from the generateContent API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiProvider {
    /// Create a provider with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] if the settings are invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: GeminiConfig, credential: Credential) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Configuration)?;
        HeaderValue::from_str(credential.expose()).map_err(|_| {
            LlmError::Configuration(
                "API key contains characters not allowed in a header".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Configured Gemini client for model '{}'", config.model);

        Ok(Self {
            config,
            credential,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send the prompt and return the first candidate's text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable
    /// - The credential is rejected
    /// - Quota is exhausted or the model is unknown
    /// - The prompt or answer is blocked
    /// - The response format is invalid
    pub fn generate_content(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: prompt
                    .parts()
                    .iter()
                    .map(|part| RequestPart { text: part })
                    .collect(),
            }],
        };

        info!(
            "Sending generateContent request: model '{}', {} parts, {} chars",
            self.config.model,
            prompt.parts().len(),
            prompt.len()
        );

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status, &error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = parsed.into_text()?;
        debug!("Received {} chars from model '{}'", text.len(), self.config.model);
        Ok(text)
    }

    fn status_error(&self, status: StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.to_string()
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication(message),
            // An invalid key is reported as 400 INVALID_ARGUMENT
            StatusCode::BAD_REQUEST if message.contains("API key") => {
                LlmError::Authentication(message)
            }
            StatusCode::NOT_FOUND => {
                LlmError::ModelNotAvailable(format!("{}: {}", self.config.model, message))
            }
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded(message),
            _ => LlmError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, LlmError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => LlmError::Blocked(format!("prompt blocked ({})", reason)),
                None => LlmError::InvalidResponse("response contained no candidates".to_string()),
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason) if reason != "STOP" => {
                Err(LlmError::Blocked(format!("generation stopped ({})", reason)))
            }
            _ => Err(LlmError::InvalidResponse(
                "response contained no text".to_string(),
            )),
        }
    }
}

impl LlmProvider for GeminiProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        self.generate_content(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{header, HeaderMap};
    use axum::routing::post;
    use axum::Router;
    use std::sync::{Arc, Mutex};

    /// A request captured by the stub service
    #[derive(Debug, Clone)]
    struct Captured {
        model_action: String,
        api_key: Option<String>,
        body: serde_json::Value,
    }

    /// Local HTTP server standing in for the Gemini API
    struct Stub {
        base_url: String,
        requests: Arc<Mutex<Vec<Captured>>>,
        _runtime: tokio::runtime::Runtime,
    }

    fn spawn_stub(status: u16, response_body: &'static str) -> Stub {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = requests.clone();

        let app = Router::new().route(
            "/v1beta/models/:model_action",
            post(
                move |Path(model_action): Path<String>, headers: HeaderMap, body: String| {
                    let captured = captured.clone();
                    async move {
                        captured.lock().unwrap().push(Captured {
                            model_action,
                            api_key: headers
                                .get(API_KEY_HEADER)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string),
                            body: serde_json::from_str(&body).unwrap(),
                        });
                        (
                            axum::http::StatusCode::from_u16(status).unwrap(),
                            [(header::CONTENT_TYPE, "application/json")],
                            response_body,
                        )
                    }
                },
            ),
        );

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Stub {
            base_url: format!("http://{}", addr),
            requests,
            _runtime: runtime,
        }
    }

    fn provider_for(stub: &Stub) -> GeminiProvider {
        let config = GeminiConfig {
            endpoint: stub.base_url.clone(),
            model: "gemini-test".to_string(),
            timeout_secs: Some(10),
        };
        GeminiProvider::new(config, Credential::new("test-key").unwrap()).unwrap()
    }

    const OK_BODY: &str = r###"{
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "## Summary\n"}, {"text": "..."}]},
            "finishReason": "STOP"
        }]
    }"###;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_fails_configuration() {
        let config = GeminiConfig {
            endpoint: "ftp://example.com".to_string(),
            ..GeminiConfig::default()
        };
        let err = GeminiProvider::new(config, Credential::new("k").unwrap()).unwrap_err();
        assert!(err.is_configuration());

        let config = GeminiConfig {
            timeout_secs: Some(0),
            ..GeminiConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(GeminiConfig::with_model("").validate().is_err());
        assert!(GeminiConfig::with_model("models/x").validate().is_err());
    }

    #[test]
    fn test_factory_configures_with_model() {
        let factory = GeminiFactory::new(GeminiConfig::with_model("gemini-1.5-pro"));
        let provider = factory.configure(&Credential::new("k").unwrap()).unwrap();
        assert_eq!(provider.model_name(), "gemini-1.5-pro");
        assert!(!format!("{:?}", provider).contains("credential"));
    }

    #[test]
    fn test_key_with_control_character_fails_configuration() {
        let factory = GeminiFactory::default();
        let key = Credential::new("AIza
secret").unwrap();

        match factory.configure(&key) {
            Err(LlmError::Configuration(message)) => assert!(message.contains("API key")),
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_generate_sends_parts_and_returns_text() {
        let stub = spawn_stub(200, OK_BODY);
        let provider = provider_for(&stub);
        let prompt = Prompt::new(vec!["first".to_string(), "second".to_string()]);

        let text = provider.generate(&prompt).unwrap();
        assert_eq!(text, "## Summary\n...");

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model_action, "gemini-test:generateContent");
        assert_eq!(request.api_key.as_deref(), Some("test-key"));
        assert_eq!(
            request.body,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "first"}, {"text": "second"}]}]
            })
        );
    }

    #[test]
    fn test_invalid_key_maps_to_authentication() {
        let stub = spawn_stub(
            400,
            r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#,
        );
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        match err {
            LlmError::Authentication(message) => assert!(message.contains("API key not valid")),
            other => panic!("Expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_quota_maps_to_rate_limit() {
        let stub = spawn_stub(
            429,
            r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::RateLimitExceeded(m) if m.contains("exhausted")));
    }

    #[test]
    fn test_unknown_model_maps_to_model_not_available() {
        let stub = spawn_stub(404, r#"{"error": {"code": 404, "message": "models/gemini-test is not found"}}"#);
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::ModelNotAvailable(m) if m.starts_with("gemini-test")));
    }

    #[test]
    fn test_server_error_without_envelope() {
        let stub = spawn_stub(503, "upstream unavailable");
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_blocked_prompt() {
        let stub = spawn_stub(200, r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::Blocked(m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_candidate_stopped_without_text() {
        let stub = spawn_stub(200, r#"{"candidates": [{"finishReason": "RECITATION"}]}"#);
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::Blocked(m) if m.contains("RECITATION")));
    }

    #[test]
    fn test_malformed_body() {
        let stub = spawn_stub(200, "not json");
        let err = provider_for(&stub).generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn test_unreachable_endpoint() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = GeminiConfig {
            endpoint: format!("http://127.0.0.1:{}", port),
            model: "gemini-test".to_string(),
            timeout_secs: Some(5),
        };
        let provider = GeminiProvider::new(config, Credential::new("k").unwrap()).unwrap();
        let err = provider.generate(&Prompt::from("x")).unwrap_err();
        assert!(matches!(err, LlmError::Communication(_)));
    }

    #[test]
    fn test_into_text_variants() {
        let parsed: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(parsed.into_text(), Err(LlmError::InvalidResponse(_))));

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}, "finishReason": "STOP"}]}"#)
                .unwrap();
        assert!(matches!(parsed.into_text(), Err(LlmError::InvalidResponse(_))));
    }
}

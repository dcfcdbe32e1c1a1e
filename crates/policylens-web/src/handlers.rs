//! HTTP request handlers for the web shell.
//!
//! Implements the upload form, the HTML and JSON analysis endpoints and the
//! health check using axum. Each analysis runs on a blocking worker.

use crate::page::{self, Notice};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use policylens_analyzer::{AnalysisError, AnalysisMetadata, AnalysisReport, AnalysisRequest, Analyzer};
use policylens_domain::{LlmProvider, ProviderFactory, RunObserver, UploadedDocument};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Multipart field carrying the API key
pub const API_KEY_FIELD: &str = "api_key";

/// Multipart field carrying the policy file
pub const POLICY_FIELD: &str = "policy";

/// Shared application state
pub struct AppState<F> {
    /// Pipeline shared by every request
    pub analyzer: Arc<Analyzer>,
    /// Builds one provider per run from the submitted key
    pub factory: Arc<F>,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl<F> AppState<F> {
    /// Create state with the given upload limit
    pub fn new(analyzer: Analyzer, factory: F, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            factory: Arc::new(factory),
            max_upload_bytes,
        }
    }
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            factory: Arc::clone(&self.factory),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Successful analysis, as returned by `POST /api/analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Run identifier
    pub run_id: String,
    /// Markdown returned by the model, unmodified
    pub markdown: String,
    /// Run metadata
    pub metadata: AnalysisMetadata,
    /// Progress messages emitted during the run
    pub statuses: Vec<String>,
    /// Non-fatal problems, e.g. skipped reference files
    pub warnings: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The pipeline refused or failed the run
    Analysis(AnalysisError),
    /// The multipart body could not be read
    Upload {
        /// Status reported by the multipart extractor
        status: StatusCode,
        /// What went wrong
        message: String,
    },
    /// Internal server error
    InternalError(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Analysis(e) => match e {
                AnalysisError::MissingCredential | AnalysisError::MissingDocument => {
                    StatusCode::BAD_REQUEST
                }
                AnalysisError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                AnalysisError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AnalysisError::Generation(_) => StatusCode::BAD_GATEWAY,
                AnalysisError::Configuration(_)
                | AnalysisError::Corpus(_)
                | AnalysisError::NoReferenceDocuments(_)
                | AnalysisError::Config(_)
                | AnalysisError::InvalidState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Upload { status, .. } => *status,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Analysis(e) => e.to_string(),
            AppError::Upload { message, .. } => message.clone(),
            AppError::InternalError(msg) => msg.clone(),
        }
    }

    fn notice(&self) -> Notice {
        match self {
            AppError::Analysis(e) if e.is_precondition() => Notice::Warning,
            _ => Notice::Error,
        }
    }

    /// Render as an HTML page with the form and a banner
    pub fn into_html(self) -> Response {
        let page = page::render_notice(self.notice(), &self.message());
        (self.status(), Html(page)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message(),
        });
        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Analysis(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

/// Observer that keeps every message for the response and logs it
#[derive(Default)]
struct CollectingObserver {
    statuses: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl CollectingObserver {
    fn into_messages(self) -> (Vec<String>, Vec<String>) {
        (
            self.statuses.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.warnings.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl RunObserver for CollectingObserver {
    fn status(&self, message: &str) {
        info!("{}", message);
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

struct CompletedRun {
    report: AnalysisReport,
    statuses: Vec<String>,
    warnings: Vec<String>,
}

/// Read the API key and policy file out of the form
///
/// A file part without a file name is what browsers send when nothing was
/// chosen, so it counts as no upload.
async fn read_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut api_key = None;
    let mut document = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(API_KEY_FIELD) => {
                api_key = Some(field.text().await?);
            }
            Some(POLICY_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() {
                    document = Some(UploadedDocument::new(file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(AnalysisRequest::from_parts(api_key.as_deref(), document))
}

async fn run_analysis<F>(state: &AppState<F>, multipart: Multipart) -> Result<CompletedRun, AppError>
where
    F: ProviderFactory + Send + Sync + 'static,
    F::Error: Display,
    <F::Provider as LlmProvider>::Error: Display,
{
    let request = read_form(multipart).await?;
    let analyzer = Arc::clone(&state.analyzer);
    let factory = Arc::clone(&state.factory);

    let outcome = tokio::task::spawn_blocking(move || {
        let observer = CollectingObserver::default();
        let result = analyzer.run(request, factory.as_ref(), &observer);
        let (statuses, warnings) = observer.into_messages();
        result.map(|report| CompletedRun {
            report,
            statuses,
            warnings,
        })
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Analysis task failed: {}", e)))?;

    outcome.map_err(|e| {
        if !e.is_precondition() {
            warn!("Analysis request failed: {}", e);
        }
        AppError::from(e)
    })
}

/// GET / - Upload form
async fn index() -> Html<String> {
    Html(page::render_form())
}

/// POST /analyze - Run an analysis and render the result page
async fn analyze_page<F>(State(state): State<AppState<F>>, multipart: Multipart) -> Response
where
    F: ProviderFactory + Send + Sync + 'static,
    F::Error: Display,
    <F::Provider as LlmProvider>::Error: Display,
{
    match run_analysis(&state, multipart).await {
        Ok(run) => {
            Html(page::render_report(&run.report, &run.statuses, &run.warnings)).into_response()
        }
        Err(e) => e.into_html(),
    }
}

/// POST /api/analyze - Run an analysis and return JSON
async fn analyze_api<F>(
    State(state): State<AppState<F>>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError>
where
    F: ProviderFactory + Send + Sync + 'static,
    F::Error: Display,
    <F::Provider as LlmProvider>::Error: Display,
{
    let run = run_analysis(&state, multipart).await?;
    Ok(Json(AnalysisResponse {
        run_id: run.report.run_id.to_string(),
        markdown: run.report.markdown,
        metadata: run.report.metadata,
        statuses: run.statuses,
        warnings: run.warnings,
    }))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<F>(state: AppState<F>) -> AxumRouter
where
    F: ProviderFactory + Send + Sync + 'static,
    F::Error: Display,
    <F::Provider as LlmProvider>::Error: Display,
{
    let limit = state.max_upload_bytes;
    AxumRouter::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_page::<F>))
        .route("/api/analyze", post(analyze_api::<F>))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

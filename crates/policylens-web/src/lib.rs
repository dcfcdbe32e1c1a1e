//! PolicyLens Web
//!
//! Browser form and JSON API around the policy analyzer.
//! One upload and one API key per request; nothing is kept between requests.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod page;

use config::WebConfig;
use handlers::{create_router, AppState};
use policylens_analyzer::{AnalysisError, Analyzer};
use policylens_llm::GeminiFactory;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Web shell error
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Analyzer could not be built
    #[error("{0}")]
    Analyzer(#[from] AnalysisError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the stderr log subscriber, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Start the web server
///
/// Validates configuration, builds the analyzer and the Gemini factory,
/// and starts the axum server.
pub async fn start_server(config: WebConfig) -> Result<(), WebError> {
    init_tracing();
    config.validate()?;

    info!("Starting PolicyLens web shell");
    info!("Bind address: {}", config.bind_addr());
    info!("Reference directory: {}", config.analyzer.data_dir.display());
    info!("Model: {}", config.gemini.model);

    let analyzer = Analyzer::new(config.analyzer.clone())?;
    let factory = GeminiFactory::new(config.gemini.clone());
    let state = AppState::new(analyzer, factory, config.max_upload_bytes);

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_analyzer() {
        let config = WebConfig::default();
        assert!(Analyzer::new(config.analyzer).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = WebError::from(config::ConfigError::Invalid("bind_address must not be empty".into()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: bind_address must not be empty"
        );
    }
}

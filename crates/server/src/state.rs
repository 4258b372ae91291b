//! # Application State
//!
//! Defines the shared application state (`AppState`) and the logic for
//! building it at startup. The completion provider and the extraction
//! backend are constructed once, injected into handlers through the state,
//! and read-only for the life of the process.

use crate::config::AppConfig;
use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use studygen::extract::TextExtractor;
use studygen::providers::ai::cohere::CohereProvider;
use studygen::providers::ai::CompletionProvider;
use studygen_pdf::PdfExtractor;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The chat-completion provider used by every generation call.
    pub completion: Arc<dyn CompletionProvider>,
    /// The document text-extraction backend.
    pub extractor: Arc<dyn TextExtractor>,
}

/// Builds the shared application state from the configuration.
///
/// Fails when the completion API key is absent; the server refuses to start
/// without it rather than failing on the first request. Also ensures the
/// upload directory exists.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let api_key = config.completion.api_key.clone().ok_or_else(|| {
        anyhow!("COHERE_API_KEY not found in environment variables. Please set it in the .env file.")
    })?;

    let completion = CohereProvider::new(
        config.completion.api_url.clone(),
        api_key,
        config.completion.model_name.clone(),
        Duration::from_secs(config.completion.timeout_secs),
    )?;
    info!(
        "Initialized completion provider for model '{}'.",
        config.completion.model_name
    );

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    Ok(AppState {
        config: Arc::new(config),
        completion: Arc::new(completion),
        extractor: Arc::new(PdfExtractor::new()),
    })
}

//! # Application Configuration
//!
//! Defines the configuration structure for `studygen-server` and the logic
//! for loading it from an optional `config.yml` and from environment
//! variables, with `${VAR}` substitution applied to the file contents before
//! parsing.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use studygen::types::{ContentKind, GenerationOptions};
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates that a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "Configuration file not found: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from the `PORT`
    /// environment variable if set.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The directory uploaded documents are written to for the life of a
    /// request.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Seconds allowed for text extraction before the request times out.
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
    /// Settings for the chat-completion provider.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Per-kind generation tuning, seeded from the library defaults.
    pub generation: GenerationConfig,
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_extraction_timeout_secs() -> u64 {
    30
}

/// Settings for the chat-completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    /// The chat endpoint URL.
    #[serde(default = "default_completion_api_url")]
    pub api_url: String,
    /// The bearer token for the completion API. A missing key is fatal at
    /// startup, not at request time.
    #[serde(default)]
    pub api_key: Option<String>,
    /// The model requested for every completion call.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// The per-call timeout for completion requests, in seconds.
    #[serde(default = "default_completion_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_api_url(),
            api_key: None,
            model_name: default_model_name(),
            timeout_secs: default_completion_timeout_secs(),
        }
    }
}

fn default_completion_api_url() -> String {
    "https://api.cohere.ai/v1/chat".to_string()
}

fn default_model_name() -> String {
    "command-a-03-2025".to_string()
}

fn default_completion_timeout_secs() -> u64 {
    60
}

/// Per-kind generation tuning.
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    pub flashcards: GenerationOptions,
    pub concepts: GenerationOptions,
    pub quiz: GenerationOptions,
}

/// Loads the application configuration.
///
/// Layering, lowest to highest precedence:
/// 1. Programmatic defaults for the per-kind generation settings, so a
///    partial override in the file or environment keeps the other fields.
/// 2. `config.yml` (or `config_path_override`), with `${VAR}` environment
///    substitution applied to its contents.
/// 3. Environment variables for top-level keys (e.g. `PORT`).
/// 4. `STUDYGEN_`-prefixed variables for nested keys
///    (e.g. `STUDYGEN_COMPLETION__MODEL_NAME`).
///
/// After all layers, `COHERE_API_KEY` is honored directly as a fallback for
/// `completion.api_key`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    for (key, options) in [
        ("flashcards", GenerationOptions::for_kind(ContentKind::Flashcards)),
        ("concepts", GenerationOptions::for_kind(ContentKind::Concepts)),
        ("quiz", GenerationOptions::for_kind(ContentKind::Quiz)),
    ] {
        builder = builder
            .set_default(
                format!("generation.{key}.max_segment_len"),
                options.max_segment_len as i64,
            )?
            .set_default(
                format!("generation.{key}.per_segment_count"),
                options.per_segment_count as i64,
            )?
            .set_default(
                format!("generation.{key}.target_count"),
                options.target_count as i64,
            )?
            .set_default(format!("generation.{key}.exact_count"), options.exact_count)?;
    }

    let main_config_path = if let Some(override_path) = config_path_override {
        if !std::path::Path::new(override_path).exists() {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{override_path}'."
            )));
        }
        Some(override_path.to_string())
    } else {
        let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
        if std::path::Path::new(&default_path).exists() {
            Some(default_path)
        } else {
            info!("No config.yml found. Using defaults and environment variables.");
            None
        }
    };

    if let Some(path) = main_config_path {
        if let Some(content) = read_and_substitute(&path)? {
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("STUDYGEN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config.completion.api_key.is_none() {
        if let Ok(key) = env::var("COHERE_API_KEY") {
            if !key.is_empty() {
                config.completion.api_key = Some(key);
            }
        }
    }

    Ok(config)
}

// Helper to read a file, substitute `${VAR}` placeholders from the
// environment, and return its content. Returns Ok(None) if the file does
// not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
                .map_err(|e| ConfigError::General(e.to_string()))?;
            let substituted_content = re.replace_all(&content, |caps: &regex::Captures| {
                let var_name = &caps["var"];
                env::var(var_name).unwrap_or_else(|_| {
                    info!("Environment variable '{var_name}' not set, substituting empty string.");
                    "".to_string()
                })
            });
            Ok(Some(substituted_content.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::General(format!(
            "Failed to read config file '{path}': {e}"
        ))),
    }
}

//! # Configuration Loading Tests
//!
//! Verifies the configuration layering: built-in defaults, the optional
//! YAML file with `${VAR}` substitution, plain environment variables, and
//! `STUDYGEN_`-prefixed overrides for nested keys.

use std::env;
use std::fs;
use std::sync::Mutex;
use studygen_server::config::{get_config, ConfigError};
use tempfile::tempdir;

// Environment variables are process-global, so every test takes this lock
// before touching them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    env::remove_var("PORT");
    env::remove_var("UPLOAD_DIR");
    env::remove_var("EXTRACTION_TIMEOUT_SECS");
    env::remove_var("COHERE_API_KEY");
    env::remove_var("STUDYGEN_COMPLETION__API_KEY");
    env::remove_var("STUDYGEN_COMPLETION__MODEL_NAME");
    env::remove_var("STUDYGEN_GENERATION__QUIZ__TARGET_COUNT");
    env::remove_var("TEST_COHERE_KEY");
}

#[test]
fn test_defaults_when_no_file_or_env_is_present() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let config = get_config(None).expect("defaults should load");

    assert_eq!(config.port, 5000);
    assert_eq!(config.upload_dir, "uploads");
    assert_eq!(config.extraction_timeout_secs, 30);
    assert_eq!(config.completion.api_url, "https://api.cohere.ai/v1/chat");
    assert_eq!(config.completion.model_name, "command-a-03-2025");
    assert_eq!(config.completion.timeout_secs, 60);
    assert!(config.completion.api_key.is_none());

    assert_eq!(config.generation.flashcards.target_count, 10);
    assert_eq!(config.generation.flashcards.per_segment_count, 8);
    assert!(config.generation.flashcards.exact_count);
    assert_eq!(config.generation.concepts.target_count, 3);
    assert!(!config.generation.concepts.exact_count);
    assert_eq!(config.generation.quiz.max_segment_len, 5000);
}

#[test]
fn test_environment_variables_override_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("PORT", "8080");
    env::set_var("STUDYGEN_COMPLETION__MODEL_NAME", "command-test");
    env::set_var("STUDYGEN_GENERATION__QUIZ__TARGET_COUNT", "5");

    let config = get_config(None).expect("config should load");

    assert_eq!(config.port, 8080);
    assert_eq!(config.completion.model_name, "command-test");
    // The overridden leaf changes while its siblings keep their defaults.
    assert_eq!(config.generation.quiz.target_count, 5);
    assert_eq!(config.generation.quiz.max_segment_len, 5000);

    clear_env_vars();
}

#[test]
fn test_cohere_api_key_is_honored_as_a_fallback() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("COHERE_API_KEY", "sk-from-env");

    let config = get_config(None).expect("config should load");

    assert_eq!(config.completion.api_key.as_deref(), Some("sk-from-env"));

    clear_env_vars();
}

#[test]
fn test_config_file_with_env_substitution() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("TEST_COHERE_KEY", "sk-from-substitution");

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.yml");
    fs::write(
        &config_path,
        r#"
port: 9999
upload_dir: "/tmp/studygen-uploads"
completion:
  api_key: "${TEST_COHERE_KEY}"
generation:
  quiz:
    target_count: 7
"#,
    )
    .unwrap();

    let config = get_config(config_path.to_str()).expect("config should load");

    assert_eq!(config.port, 9999);
    assert_eq!(config.upload_dir, "/tmp/studygen-uploads");
    assert_eq!(
        config.completion.api_key.as_deref(),
        Some("sk-from-substitution")
    );
    // File values merge over the seeded generation defaults.
    assert_eq!(config.generation.quiz.target_count, 7);
    assert_eq!(config.generation.quiz.per_segment_count, 3);
    // Unset completion fields keep their defaults.
    assert_eq!(config.completion.model_name, "command-a-03-2025");

    clear_env_vars();
}

#[test]
fn test_missing_override_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let result = get_config(Some("/path/that/does/not/exist/config.yml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

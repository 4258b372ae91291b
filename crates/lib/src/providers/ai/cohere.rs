//! # Cohere Chat Provider
//!
//! An implementation of the [`CompletionProvider`] trait for the Cohere chat
//! API. Every call requests structured output by attaching a JSON schema for
//! the content kind, and the API returns the structured payload as a
//! JSON-encoded string inside its response envelope.

use crate::errors::CompletionError;
use crate::providers::ai::CompletionProvider;
use crate::types::ContentKind;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

// --- Cohere-specific request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    schema: Value,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    text: String,
}

/// Returns the structured-output schema for a content kind.
fn response_schema(kind: ContentKind) -> Value {
    match kind {
        ContentKind::Flashcards => json!({
            "type": "object",
            "properties": {
                "flashcards": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "answer": { "type": "string" }
                        },
                        "required": ["question", "answer"]
                    }
                }
            },
            "required": ["flashcards"]
        }),
        ContentKind::Concepts => json!({
            "type": "object",
            "properties": {
                "concepts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "concept": { "type": "string" },
                            "definition": { "type": "string" },
                            "real_world_application": { "type": "string" },
                            "latest_insight": { "type": "string" }
                        },
                        "required": [
                            "concept",
                            "definition",
                            "real_world_application",
                            "latest_insight"
                        ]
                    }
                }
            },
            "required": ["concepts"]
        }),
        ContentKind::Quiz => json!({
            "type": "object",
            "properties": {
                "quiz": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "options": {
                                "type": "array",
                                "items": { "type": "string" }
                            },
                            "correct_answer": { "type": "string" },
                            "explanation": { "type": "string" }
                        },
                        "required": [
                            "question",
                            "options",
                            "correct_answer",
                            "explanation"
                        ]
                    }
                }
            },
            "required": ["quiz"]
        }),
    }
}

// --- Cohere Provider Implementation ---

/// A provider for interacting with the Cohere chat API.
#[derive(Clone, Debug)]
pub struct CohereProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl CohereProvider {
    /// Creates a new `CohereProvider`.
    ///
    /// `timeout` bounds every completion call issued through this provider.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl CompletionProvider for CohereProvider {
    async fn complete(&self, kind: ContentKind, prompt: &str) -> Result<String, CompletionError> {
        let request_body = ChatRequest {
            model: &self.model,
            message: prompt,
            response_format: ResponseFormat {
                format_type: "json_object",
                schema: response_schema(kind),
            },
        };

        debug!(
            "Sending {:?} completion request to {} with model '{}'.",
            kind, self.api_url, self.model
        );
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse = response.json().await.map_err(CompletionError::Envelope)?;

        // The structured payload arrives as a JSON-encoded string in the
        // envelope's `text` field, so it is parsed a second time and
        // re-serialized into a normalized JSON string.
        let payload: Value =
            serde_json::from_str(&envelope.text).map_err(CompletionError::Payload)?;

        if let Some(items) = payload.get(kind.response_key()).and_then(Value::as_array) {
            info!(
                "Completion returned {} item(s) under '{}'.",
                items.len(),
                kind.response_key()
            );
            debug!("Structured completion payload: {payload}");
        }

        Ok(payload.to_string())
    }
}

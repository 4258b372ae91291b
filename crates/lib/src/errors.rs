//! Error types for the completion provider and the generation pipeline.

use thiserror::Error;

/// Errors that can occur while calling the chat-completion API.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    /// The request to the completion API could not be sent.
    #[error("Failed to send request to completion API: {0}")]
    Request(reqwest::Error),

    /// The completion call exceeded its configured timeout.
    #[error("Completion API call timed out")]
    Timeout,

    /// The completion API responded with a non-success status code.
    #[error("Completion API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response envelope could not be deserialized.
    #[error("Failed to parse completion API response envelope: {0}")]
    Envelope(reqwest::Error),

    /// The string-encoded structured payload inside the envelope was not
    /// valid JSON.
    #[error("Failed to parse structured completion payload: {0}")]
    Payload(serde_json::Error),

    /// No API key was provided.
    #[error("API key is missing")]
    MissingApiKey,
}

/// Errors that can occur in the study-material generation pipeline.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A generation prompt was requested for empty or whitespace-only text.
    #[error("Segment text is empty or contains only whitespace")]
    EmptySegment,

    /// A completion call failed.
    #[error("Completion provider call failed: {0}")]
    Completion(#[from] CompletionError),

    /// A structured payload could not be serialized or deserialized.
    #[error("Structured payload handling failed: {0}")]
    Payload(#[from] serde_json::Error),
}

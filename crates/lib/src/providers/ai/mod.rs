//! # AI Completion Providers
//!
//! Defines the [`CompletionProvider`] trait, the seam between the generation
//! pipeline and a concrete chat-completion backend.

pub mod cohere;

use crate::errors::CompletionError;
use crate::types::ContentKind;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for issuing structured chat-completion calls.
///
/// Implementations are stateless request/response wrappers around an
/// external chat-completion capability: given a content kind and a prompt,
/// they return the kind's structured payload as a normalized JSON string.
/// Endpoint, credentials, and model are fixed at construction and read-only
/// afterwards, so one provider value can serve concurrent requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug + DynClone {
    /// Issues one completion call for `kind` and returns the structured
    /// payload as a JSON string.
    async fn complete(&self, kind: ContentKind, prompt: &str) -> Result<String, CompletionError>;
}

dyn_clone::clone_trait_object!(CompletionProvider);

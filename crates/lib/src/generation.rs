//! # Generation Pipeline
//!
//! Orchestrates study-material generation for one extracted text: segment
//! the text, issue one completion call per segment, validate and merge the
//! per-segment results, and issue at most one backfill call when the merged
//! set falls short of its target count.

use crate::errors::GenerationError;
use crate::merge::merge_deduped;
use crate::prompts::{build_backfill_prompt, build_generation_prompt};
use crate::providers::ai::CompletionProvider;
use crate::segment::segment_text;
use crate::types::{ConceptCard, ContentKind, Flashcard, GenerationOptions, QuizQuestion, StudyItem};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Generates flashcards from extracted document text.
pub async fn generate_flashcards(
    provider: &dyn CompletionProvider,
    text: &str,
    options: &GenerationOptions,
) -> Result<Vec<Flashcard>, GenerationError> {
    run_generation(provider, text, options).await
}

/// Generates enhanced-learning concept cards from extracted document text.
pub async fn generate_concept_cards(
    provider: &dyn CompletionProvider,
    text: &str,
    options: &GenerationOptions,
) -> Result<Vec<ConceptCard>, GenerationError> {
    run_generation(provider, text, options).await
}

/// Generates multiple-choice quiz questions from extracted document text.
pub async fn generate_quiz(
    provider: &dyn CompletionProvider,
    text: &str,
    options: &GenerationOptions,
) -> Result<Vec<QuizQuestion>, GenerationError> {
    run_generation(provider, text, options).await
}

/// Runs the full generation pipeline for one content kind.
///
/// Segments are processed strictly in order: each segment's completion call
/// finishes before the next begins, so the merged result keeps first-seen
/// order across segments. A single-segment run requests the full target
/// count; a split run requests `per_segment_count` items per segment. If the
/// merged set is short of `target_count`, exactly one backfill call is
/// issued, seeded with the existing items, and kinds with `exact_count` set
/// are then truncated back to the target. A result still short after the
/// backfill is returned as-is.
#[instrument(skip(provider, text, options))]
pub async fn run_generation<T: StudyItem>(
    provider: &dyn CompletionProvider,
    text: &str,
    options: &GenerationOptions,
) -> Result<Vec<T>, GenerationError> {
    let kind = T::KIND;
    let segments = segment_text(text, options.max_segment_len);
    let request_count = if segments.len() > 1 {
        options.per_segment_count
    } else {
        options.target_count
    };
    info!(
        "Starting {:?} generation over {} segment(s), requesting {} item(s) per segment.",
        kind,
        segments.len(),
        request_count
    );

    let mut results: Vec<Vec<T>> = Vec::with_capacity(segments.len());
    for segment in &segments {
        let prompt = build_generation_prompt(kind, segment, request_count)?;
        let payload = provider.complete(kind, &prompt).await?;
        results.push(parse_items(kind, &payload)?);
    }

    let mut merged = merge_deduped(results);
    info!(
        "Merged {} unique {:?} item(s) from {} segment(s).",
        merged.len(),
        kind,
        segments.len()
    );

    if merged.len() < options.target_count {
        let remaining = options.target_count - merged.len();
        info!(
            "Result is short of the target ({} < {}). Issuing one backfill call for {} item(s).",
            merged.len(),
            options.target_count,
            remaining
        );
        let existing_json = serde_json::to_string_pretty(&merged)?;
        let prompt = build_backfill_prompt(kind, &existing_json, remaining);
        let payload = provider.complete(kind, &prompt).await?;
        let extra = parse_items(kind, &payload)?;
        merged = merge_deduped(vec![merged, extra]);

        if options.exact_count {
            merged.truncate(options.target_count);
        }
        if merged.len() < options.target_count {
            warn!(
                "Result is still {} item(s) short of the target of {} after the backfill call.",
                options.target_count - merged.len(),
                options.target_count
            );
        }
    }

    Ok(merged)
}

/// Parses the item array for `kind` out of a structured completion payload.
///
/// Items that fail shape validation are dropped with a warning rather than
/// failing the whole payload, and a payload without the expected top-level
/// array yields an empty list.
fn parse_items<T: StudyItem>(kind: ContentKind, payload: &str) -> Result<Vec<T>, GenerationError> {
    let value: Value = serde_json::from_str(payload)?;
    let Some(values) = value.get(kind.response_key()).and_then(Value::as_array) else {
        warn!(
            "Completion payload has no '{}' array. Treating it as empty.",
            kind.response_key()
        );
        return Ok(Vec::new());
    };

    let mut items = Vec::with_capacity(values.len());
    let mut dropped = 0usize;
    for item in values {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!("Dropping malformed {:?} item: {e}", kind);
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        warn!(
            "Dropped {} of {} {:?} item(s) during shape validation.",
            dropped,
            values.len(),
            kind
        );
    }
    Ok(items)
}

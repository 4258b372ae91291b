//! # Generation Prompt Templates
//!
//! This module contains the prompt templates for each content kind, with
//! `{count}` and `{text}` placeholders, and the builders that fill them in.
//! Every template instructs the model to return a single JSON object keyed
//! by the kind's response key, so the structured payload can be parsed
//! uniformly downstream.

use crate::errors::GenerationError;
use crate::types::ContentKind;

/// The prompt template for flashcard generation.
pub const FLASHCARD_GENERATION_PROMPT: &str = r#"Create educational flashcards from the following text.
Generate exactly {count} flashcards with clear, concise questions and detailed answers.
Focus on key concepts and important details.

Text:
{text}

Format the response as a JSON object with a 'flashcards' array containing objects with:
- question: string
- answer: string"#;

/// The prompt template for enhanced-learning concept generation.
pub const CONCEPT_GENERATION_PROMPT: &str = r#"Create detailed learning content from the following text.
Identify exactly {count} key concepts. For each key concept, provide:
1. A clear, concise definition
2. A real-world application or example
3. A recent research insight or discovery (include a citation if possible)

Text:
{text}

Format the response as a JSON object with a 'concepts' array containing objects with:
- concept: The main topic name
- definition: A clear definition
- real_world_application: A practical example or application
- latest_insight: Recent research or discovery with citation"#;

/// The prompt template for multiple-choice quiz generation.
pub const QUIZ_GENERATION_PROMPT: &str = r#"Based on the following text, generate a quiz with {count} multiple choice questions. Each question should:
1. Test understanding of key concepts
2. Have exactly 4 options labeled A, B, C, and D
3. Include a clear explanation for the correct answer

Text to use for generating questions:
{text}

Format the response as a JSON object with a 'quiz' array containing objects with:
- question: string
- options: array of 4 strings
- correct_answer: string (one of the options)
- explanation: string explaining why the answer is correct"#;

/// The prompt template for the single backfill call issued when a merged
/// result set falls short of its target count.
pub const BACKFILL_PROMPT: &str = r#"Generate {count} more {noun} to complement these existing ones:
{existing}

Make sure the new {noun} are different from the existing ones and cover different aspects of the text.
Format the response as a JSON object with a '{key}' array. Each item must have the same fields as the existing ones."#;

/// Builds the generation prompt for one text segment.
///
/// Fails only when the segment text is empty or whitespace, which the
/// extraction and segmentation stages upstream are expected to prevent.
pub fn build_generation_prompt(
    kind: ContentKind,
    segment_text: &str,
    count: usize,
) -> Result<String, GenerationError> {
    if segment_text.trim().is_empty() {
        return Err(GenerationError::EmptySegment);
    }

    let template = match kind {
        ContentKind::Flashcards => FLASHCARD_GENERATION_PROMPT,
        ContentKind::Concepts => CONCEPT_GENERATION_PROMPT,
        ContentKind::Quiz => QUIZ_GENERATION_PROMPT,
    };

    Ok(template
        .replace("{count}", &count.to_string())
        .replace("{text}", segment_text))
}

/// Builds the backfill prompt from the serialized existing items and the
/// remaining shortfall.
pub fn build_backfill_prompt(kind: ContentKind, existing_json: &str, remaining: usize) -> String {
    BACKFILL_PROMPT
        .replace("{count}", &remaining.to_string())
        .replace("{noun}", kind.item_noun())
        .replace("{key}", kind.response_key())
        .replace("{existing}", existing_json)
}

//! # studygen: Study Material Generation
//!
//! The core pipeline for turning extracted document text into structured
//! study material: flashcards, enhanced-learning concept cards, and
//! multiple-choice quiz questions.
//!
//! The pipeline is deterministic apart from the completion calls themselves:
//! long text is split into two overlapping segments, each segment is sent to
//! a chat-completion provider with a kind-specific structured-output schema,
//! the per-segment results are validated, merged, and de-duplicated, and a
//! single backfill call tops up result sets that fall short of their target
//! count.
//!
//! Document text extraction is abstracted behind the [`TextExtractor`] trait
//! so that format-specific backends (such as `studygen-pdf`) stay out of
//! this crate.

// --- Public Modules ---
pub mod errors;
pub mod extract;
pub mod generation;
pub mod merge;
pub mod prompts;
pub mod providers;
pub mod segment;
pub mod types;

// --- Public Exports ---
pub use errors::{CompletionError, GenerationError};
pub use extract::{chunk_page_range, ExtractError, ExtractionRequest, TextExtractor};
pub use generation::{
    generate_concept_cards, generate_flashcards, generate_quiz, run_generation,
};
pub use merge::merge_deduped;
pub use providers::ai::CompletionProvider;
pub use segment::{segment_text, SEGMENT_OVERLAP};
pub use types::{
    ConceptCard, ContentKind, Flashcard, GenerationOptions, QuizQuestion, StudyItem,
};

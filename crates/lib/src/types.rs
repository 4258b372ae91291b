//! # Core Data Structures
//!
//! Defines the content kinds, the study-item shapes returned to clients, and
//! the per-kind generation tuning.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The kind of study material a generation request produces.
///
/// The kind is threaded explicitly through prompt construction, schema
/// selection, and payload parsing, so none of those stages ever infer it
/// from prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Flashcards,
    Concepts,
    Quiz,
}

impl ContentKind {
    /// The top-level key the structured completion payload stores its item
    /// array under.
    pub fn response_key(&self) -> &'static str {
        match self {
            ContentKind::Flashcards => "flashcards",
            ContentKind::Concepts => "concepts",
            ContentKind::Quiz => "quiz",
        }
    }

    /// A plural noun for the kind's items, used in prompt text.
    pub fn item_noun(&self) -> &'static str {
        match self {
            ContentKind::Flashcards => "flashcards",
            ContentKind::Concepts => "learning concepts",
            ContentKind::Quiz => "quiz questions",
        }
    }
}

/// A question/answer flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// An enhanced-learning concept card: a definition enriched with a practical
/// application and a recent research insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptCard {
    pub concept: String,
    pub definition: String,
    pub real_world_application: String,
    pub latest_insight: String,
}

/// A multiple-choice quiz question with four options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// A single structured unit of generated study material.
///
/// Implementors tie a serde-compatible item shape to its content kind and
/// provide the normalized identity used to drop duplicates when per-segment
/// results are merged.
pub trait StudyItem: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The content kind this item belongs to.
    const KIND: ContentKind;

    /// The normalized de-duplication key for this item.
    ///
    /// Two items with the same key are considered the same item regardless
    /// of casing or surrounding whitespace in their identity text.
    fn dedup_key(&self) -> String;
}

impl StudyItem for Flashcard {
    const KIND: ContentKind = ContentKind::Flashcards;

    fn dedup_key(&self) -> String {
        self.question.trim().to_lowercase()
    }
}

impl StudyItem for ConceptCard {
    const KIND: ContentKind = ContentKind::Concepts;

    fn dedup_key(&self) -> String {
        self.concept.trim().to_lowercase()
    }
}

impl StudyItem for QuizQuestion {
    const KIND: ContentKind = ContentKind::Quiz;

    fn dedup_key(&self) -> String {
        self.question.trim().to_lowercase()
    }
}

/// Tuning for one generation run, scoped to a content kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum segment length in characters before the text is split into
    /// two overlapping segments.
    pub max_segment_len: usize,
    /// How many items to request per segment when the text is split.
    pub per_segment_count: usize,
    /// The item count the merged result is measured against.
    pub target_count: usize,
    /// When true, the result is truncated to exactly `target_count` after a
    /// backfill; otherwise `target_count` is a minimum and extra unique
    /// items are kept.
    pub exact_count: bool,
}

impl GenerationOptions {
    /// The default tuning for a content kind.
    pub fn for_kind(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Flashcards => Self {
                max_segment_len: 10_000,
                per_segment_count: 8,
                target_count: 10,
                exact_count: true,
            },
            ContentKind::Concepts => Self {
                max_segment_len: 10_000,
                per_segment_count: 5,
                target_count: 3,
                exact_count: false,
            },
            ContentKind::Quiz => Self {
                max_segment_len: 5_000,
                per_segment_count: 3,
                target_count: 3,
                exact_count: true,
            },
        }
    }
}

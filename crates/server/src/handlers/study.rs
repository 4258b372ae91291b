//! # Study Material Handlers
//!
//! The handlers for the three generation endpoints. They share one upload
//! pipeline: read and validate the multipart form, persist the PDF under a
//! unique name, extract its text within a time budget, run the generation
//! pipeline, and remove the stored file on every exit path.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use studygen::extract::ExtractionRequest;
use studygen::generation::run_generation;
use studygen::types::{ConceptCard, Flashcard, GenerationOptions, QuizQuestion, StudyItem};
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

const PROCESSED_MESSAGE: &str = "PDF processed successfully";

// --- Upload Intake ---

/// A validated PDF upload parsed from a multipart form.
struct PdfUpload {
    filename: String,
    data: Vec<u8>,
    extraction: ExtractionRequest,
}

/// Reads the multipart form and validates the upload.
///
/// The form must carry a `file` part with a `.pdf` filename, and either
/// both or neither of the optional `chunk` and `total_chunks` fields.
async fn read_pdf_upload(mut multipart: Multipart) -> Result<PdfUpload, AppError> {
    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;
    let mut chunk: Option<u32> = None;
    let mut total_chunks: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(anyhow::Error::from)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                if file_name.is_empty() {
                    return Err(AppError::BadRequest("No selected file".to_string()));
                }
                if !file_name.to_lowercase().ends_with(".pdf") {
                    return Err(AppError::BadRequest(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
                filename = Some(file_name);
            }
            "chunk" => {
                let value = field.text().await.map_err(anyhow::Error::from)?;
                chunk = Some(value.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("Invalid 'chunk' value: '{value}'"))
                })?);
            }
            "total_chunks" => {
                let value = field.text().await.map_err(anyhow::Error::from)?;
                total_chunks = Some(value.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("Invalid 'total_chunks' value: '{value}'"))
                })?);
            }
            _ => {
                warn!("Ignoring unknown multipart field: '{name}'.");
            }
        }
    }

    let (Some(filename), Some(data)) = (filename, data) else {
        return Err(AppError::BadRequest("No file part".to_string()));
    };

    let extraction = match (chunk, total_chunks) {
        (None, None) => ExtractionRequest::Whole,
        (Some(number), Some(total)) => ExtractionRequest::Chunk { number, total },
        _ => {
            return Err(AppError::BadRequest(
                "Both 'chunk' and 'total_chunks' are required for chunked extraction".to_string(),
            ))
        }
    };

    Ok(PdfUpload {
        filename,
        data,
        extraction,
    })
}

/// Replaces every character outside `[A-Za-z0-9._-]` so the stored name can
/// never escape the upload directory.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Removes the stored upload when the request finishes, on every exit path.
struct UploadGuard {
    path: PathBuf,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Removed temporary file '{}'.", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove uploaded file '{}': {e}",
                self.path.display()
            ),
        }
    }
}

// --- Shared Generation Pipeline ---

/// Runs the full upload-to-items pipeline for one content kind.
async fn generate_from_upload<T: StudyItem>(
    state: &AppState,
    multipart: Multipart,
    options: &GenerationOptions,
) -> Result<Vec<T>, AppError> {
    let upload = read_pdf_upload(multipart).await?;
    info!(
        "Processing '{}' ({} bytes) for {:?} generation with {:?}.",
        upload.filename,
        upload.data.len(),
        T::KIND,
        upload.extraction
    );

    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(&upload.filename));
    let path = Path::new(&state.config.upload_dir).join(stored_name);
    tokio::fs::write(&path, &upload.data)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save uploaded file: {e}"))?;
    info!("Saved uploaded file to '{}'.", path.display());
    let _guard = UploadGuard { path: path.clone() };

    let extraction_window = Duration::from_secs(state.config.extraction_timeout_secs);
    let text = match timeout(
        extraction_window,
        state.extractor.extract(&path, upload.extraction),
    )
    .await
    {
        Ok(extracted) => extracted?,
        Err(_) => {
            warn!(
                "Text extraction for '{}' exceeded {}s.",
                upload.filename, state.config.extraction_timeout_secs
            );
            return Err(AppError::Timeout(
                "PDF text extraction timed out. The file might be too large or complex."
                    .to_string(),
            ));
        }
    };

    let items = run_generation::<T>(state.completion.as_ref(), &text, options).await?;
    Ok(items)
}

// --- Endpoint Handlers ---

/// The response body for `POST /api/flashcards/generate`.
#[derive(Serialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
    pub message: String,
}

/// Generates flashcards from an uploaded PDF.
pub async fn generate_flashcards_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FlashcardsResponse>, AppError> {
    info!("Received request to generate flashcards.");
    let flashcards =
        generate_from_upload::<Flashcard>(&state, multipart, &state.config.generation.flashcards)
            .await?;
    info!("Generated {} flashcard(s).", flashcards.len());
    Ok(Json(FlashcardsResponse {
        flashcards,
        message: PROCESSED_MESSAGE.to_string(),
    }))
}

/// The response body for `POST /api/learning/enhanced`.
#[derive(Serialize)]
pub struct EnhancedLearningResponse {
    pub learning_content: Vec<ConceptCard>,
    pub message: String,
}

/// Generates enhanced-learning concept cards from an uploaded PDF.
pub async fn generate_enhanced_learning_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EnhancedLearningResponse>, AppError> {
    info!("Received request to generate enhanced learning content.");
    let learning_content =
        generate_from_upload::<ConceptCard>(&state, multipart, &state.config.generation.concepts)
            .await?;
    info!("Generated {} concept card(s).", learning_content.len());
    Ok(Json(EnhancedLearningResponse {
        learning_content,
        message: PROCESSED_MESSAGE.to_string(),
    }))
}

/// The response body for `POST /api/quiz/generate`.
#[derive(Serialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestion>,
    pub message: String,
}

/// Generates a multiple-choice quiz from an uploaded PDF.
pub async fn generate_quiz_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuizResponse>, AppError> {
    info!("Received request to generate a quiz.");
    let quiz =
        generate_from_upload::<QuizQuestion>(&state, multipart, &state.config.generation.quiz)
            .await?;
    info!("Generated {} quiz question(s).", quiz.len());
    Ok(Json(QuizResponse {
        quiz,
        message: PROCESSED_MESSAGE.to_string(),
    }))
}

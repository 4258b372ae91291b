//! # studygen-pdf: PDF Text Extraction
//!
//! The PDF backend for the `studygen` pipeline. It implements the core
//! [`TextExtractor`] trait: parsing runs on a blocking thread, text is
//! collected page by page in page order, and a chunked request narrows the
//! walk to its computed page range before any content stream is decoded.

use async_trait::async_trait;
use pdf::file::FileOptions;
use std::path::Path;
use studygen::extract::{chunk_page_range, ExtractError, ExtractionRequest, TextExtractor};
use tracing::{info, warn};

/// Extracts plain text from PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Creates a new `PdfExtractor`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(
        &self,
        path: &Path,
        request: ExtractionRequest,
    ) -> Result<String, ExtractError> {
        info!("Extracting text from PDF at '{}'.", path.display());
        let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractError::NotFound(path.display().to_string()),
            _ => ExtractError::Read(e.to_string()),
        })?;

        // PDF parsing is CPU-bound, so it runs on a blocking thread.
        let text = tokio::task::spawn_blocking(move || extract_pdf_text(&data, request))
            .await
            .map_err(|e| {
                ExtractError::Internal(anyhow::anyhow!("Tokio join error during PDF parsing: {e}"))
            })??;

        if text.trim().is_empty() {
            warn!("No text could be extracted from '{}'.", path.display());
            return Err(ExtractError::NoText);
        }

        info!(
            "Successfully extracted {} characters from '{}'.",
            text.len(),
            path.display()
        );
        Ok(text)
    }
}

/// Walks the content operations of the requested pages and collects the
/// drawn text, appending a newline after each page that yields any.
fn extract_pdf_text(data: &[u8], request: ExtractionRequest) -> Result<String, ExtractError> {
    let file = FileOptions::cached()
        .load(data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let total_pages = file.num_pages();

    let range = match request {
        ExtractionRequest::Whole => 0..total_pages,
        ExtractionRequest::Chunk { number, total } => {
            chunk_page_range(total_pages, number, total)?
        }
    };
    info!(
        "Document has {} page(s). Extracting pages {}..{}.",
        total_pages, range.start, range.end
    );

    let mut full_text = String::new();
    for page_num in range {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        let Some(content) = &page.contents else {
            warn!("Page {page_num} has no content stream. Skipping it.");
            continue;
        };
        let operations = content
            .operations(&resolver)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let mut page_text = String::new();
        for op in operations.iter() {
            match op {
                pdf::content::Op::TextDraw { text } => {
                    page_text.push_str(&text.to_string_lossy());
                }
                pdf::content::Op::TextDrawAdjusted { array } => {
                    for item in array.iter() {
                        if let pdf::content::TextDrawAdjusted::Text(text) = item {
                            page_text.push_str(&text.to_string_lossy());
                        }
                    }
                }
                _ => {}
            }
        }

        if page_text.trim().is_empty() {
            warn!("Page {page_num} yielded no text. Skipping it.");
            continue;
        }
        full_text.push_str(&page_text);
        full_text.push('\n');
    }

    Ok(full_text)
}

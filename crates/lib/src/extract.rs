//! # Text Extraction Contract
//!
//! Defines the extraction request model, the page-range math used by chunked
//! extraction, and the [`TextExtractor`] trait that format-specific backends
//! implement.

use async_trait::async_trait;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during document text extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document file could not be found.
    #[error("The document could not be found: {0}")]
    NotFound(String),

    /// The document file could not be read.
    #[error("Failed to read the document: {0}")]
    Read(String),

    /// The document content could not be parsed.
    #[error("Failed to parse the document content: {0}")]
    Parse(String),

    /// The document contains no extractable text.
    #[error("No extractable text found in the document")]
    NoText,

    /// The chunk request itself is malformed.
    #[error("Invalid chunk request: chunk {number} of {total}")]
    InvalidChunk { number: u32, total: u32 },

    /// The chunk request is valid but maps to no pages of this document.
    #[error("Chunk {number} of {total} covers no pages of a {pages}-page document")]
    EmptyChunk { number: u32, total: u32, pages: u32 },

    /// An unexpected internal error.
    #[error("An internal error occurred during extraction: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Selects how much of a document one extraction call covers.
///
/// Chunk numbers are 1-indexed: `Chunk { number: 1, total: 4 }` covers the
/// first quarter of the document's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRequest {
    /// Extract every page of the document.
    Whole,
    /// Extract one contiguous page-range chunk out of `total`.
    Chunk { number: u32, total: u32 },
}

/// Computes the half-open page range covered by chunk `number` of `total`
/// over a document with `total_pages` pages.
///
/// Pages are divided into contiguous groups of `max(1, total_pages / total)`
/// pages, and the last chunk absorbs the division remainder, so the ranges
/// for chunks `1..=total` are non-empty, non-overlapping, and cover every
/// page exactly once whenever `total <= total_pages`. Requesting more chunks
/// than the document has pages leaves later chunks without pages, which is
/// reported as [`ExtractError::EmptyChunk`].
pub fn chunk_page_range(
    total_pages: u32,
    number: u32,
    total: u32,
) -> Result<Range<u32>, ExtractError> {
    if number == 0 || total == 0 || number > total {
        return Err(ExtractError::InvalidChunk { number, total });
    }

    let pages_per_chunk = std::cmp::max(1, total_pages / total);
    let start = (number - 1) * pages_per_chunk;
    let end = if number == total {
        total_pages
    } else {
        std::cmp::min(number * pages_per_chunk, total_pages)
    };

    if start >= end {
        return Err(ExtractError::EmptyChunk {
            number,
            total,
            pages: total_pages,
        });
    }

    Ok(start..end)
}

/// A trait for extracting plain text from an uploaded document.
///
/// Implementations only read the document; removing it when the request
/// finishes is the caller's responsibility.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extracts the text covered by `request` from the document at `path`.
    async fn extract(
        &self,
        path: &Path,
        request: ExtractionRequest,
    ) -> Result<String, ExtractError>;
}

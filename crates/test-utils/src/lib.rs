//! # studygen-test-utils
//!
//! Shared test utilities for the `studygen` workspace: a programmable mock
//! completion provider, and PDF fixture builders behind the `pdf` feature.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use studygen::errors::CompletionError;
use studygen::providers::ai::CompletionProvider;
use studygen::types::ContentKind;

// --- Mock Completion Provider ---

/// A programmable [`CompletionProvider`] for tests.
///
/// Responses are keyed by a unique substring of the expected prompt, and
/// every call is recorded so tests can assert on call counts and prompt
/// contents. A prompt that matches no programmed key fails the call, which
/// surfaces missing expectations immediately.
#[derive(Clone, Debug, Default)]
pub struct MockCompletionProvider {
    /// Maps a prompt substring to the payload returned for it.
    responses: Arc<Mutex<HashMap<String, String>>>,
    /// Records the `(kind, prompt)` of every call for later assertions.
    calls: Arc<Mutex<Vec<(ContentKind, String)>>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs the payload returned for any prompt containing `key`.
    pub fn add_response(&self, key: &str, payload: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), payload.to_string());
    }

    /// Returns the recorded `(kind, prompt)` calls, in order.
    pub fn calls(&self) -> Vec<(ContentKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, kind: ContentKind, prompt: &str) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((kind, prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, payload) in responses.iter() {
            if prompt.contains(key) {
                return Ok(payload.clone());
            }
        }

        Err(CompletionError::Api {
            status: 500,
            body: format!("MockCompletionProvider has no response for prompt: '{prompt}'"),
        })
    }
}

// --- PDF Fixtures ---

#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

    /// Generates a single-page PDF drawing `text`.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        generate_multi_page_pdf(&[text])
    }

    /// Generates a PDF with one page per entry in `pages`.
    ///
    /// Each page draws its text with the built-in Helvetica Type1 font, so
    /// extraction reads the exact input back rather than subset glyph IDs.
    pub fn generate_multi_page_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let font_id = Ref::new(3);
        let font_name = Name(b"F1");

        let mut next_id = 4;
        let mut page_refs = Vec::with_capacity(pages.len());
        for _ in pages {
            page_refs.push((Ref::new(next_id), Ref::new(next_id + 1)));
            next_id += 2;
        }

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_refs.iter().map(|(page_id, _)| *page_id))
            .count(pages.len() as i32);

        for ((page_id, content_id), text) in page_refs.iter().zip(pages) {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, 595.0, 842.0));
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources().fonts().pair(font_name, font_id);
            page.finish();

            let mut content = Content::new();
            content.begin_text();
            content.set_font(font_name, 14.0);
            content.next_line(108.0, 734.0);
            content.show(Str(text.as_bytes()));
            content.end_text();
            pdf.stream(*content_id, &content.finish());
        }

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Ok(pdf.finish())
    }
}

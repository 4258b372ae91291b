//! # Text Segmentation
//!
//! Splits long extracted text into two overlapping segments so that concepts
//! spanning the split boundary are still seen whole by at least one
//! generation call.

use tracing::warn;

/// The character overlap between the two segments of split text.
pub const SEGMENT_OVERLAP: usize = 1000;

/// Splits `text` into generation segments.
///
/// Text of at most `max_len` characters is returned unchanged as a single
/// segment. Longer text yields exactly two segments: the first `max_len`
/// characters, and a second window of up to `max_len` characters starting
/// [`SEGMENT_OVERLAP`] characters before the end of the first. All indexing
/// is character-based, so multi-byte input is never split inside a code
/// point.
pub fn segment_text(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return vec![text.to_string()];
    }

    warn!(
        "Text length {} exceeds the segment limit of {}. Splitting into two overlapping segments.",
        chars.len(),
        max_len
    );

    let first: String = chars[..max_len].iter().collect();
    let start = max_len.saturating_sub(SEGMENT_OVERLAP);
    let end = std::cmp::min(start + max_len, chars.len());
    let second: String = chars[start..end].iter().collect();

    vec![first, second]
}

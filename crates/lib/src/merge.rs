//! # Result Merging and De-duplication

use crate::types::StudyItem;
use std::collections::HashSet;

/// Merges per-segment result lists into one, dropping duplicate items.
///
/// Lists are concatenated in input order and de-duplicated by each item's
/// normalized key. The first occurrence of a key wins, so the output
/// preserves first-seen order across segments, and merging an already-merged
/// list again changes nothing.
pub fn merge_deduped<T: StudyItem>(lists: Vec<Vec<T>>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for list in lists {
        for item in list {
            if seen.insert(item.dedup_key()) {
                merged.push(item);
            }
        }
    }
    merged
}

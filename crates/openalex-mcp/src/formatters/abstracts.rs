//! Abstract reconstruction from the OpenAlex inverted index.
//!
//! OpenAlex stores abstracts as a word -> positions map rather than raw text.
//! Reconstruction places every word at each position it occupies and joins in
//! ascending positional order. The full reconstruction is correctness-critical
//! and fails loudly on a malformed index; the bounded preview is lossy by
//! contract and degrades to absence instead.

use std::collections::HashMap;

use crate::error::{ToolError, ToolResult};

/// Maximum characters in a summary abstract preview.
pub const PREVIEW_MAX_CHARS: usize = 500;

/// Rebuild the abstract text in exact positional order.
///
/// # Errors
///
/// Returns an error if the index assigns a negative position or places two
/// words at the same position.
pub fn reconstruct_abstract(index: &HashMap<String, Vec<i64>>) -> ToolResult<String> {
    let mut slots: Vec<(i64, &str)> = Vec::new();

    for (word, positions) in index {
        for &position in positions {
            if position < 0 {
                return Err(ToolError::internal(format!(
                    "abstract index places '{word}' at negative position {position}"
                )));
            }
            slots.push((position, word.as_str()));
        }
    }

    slots.sort_unstable();

    for pair in slots.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(ToolError::internal(format!(
                "abstract index places '{}' and '{}' at the same position {}",
                pair[0].1, pair[1].1, pair[0].0
            )));
        }
    }

    Ok(slots.iter().map(|&(_, word)| word).collect::<Vec<_>>().join(" "))
}

/// Build a size-bounded abstract preview, or `None` when no usable abstract
/// exists. Unlike [`reconstruct_abstract`], a malformed index is swallowed.
#[must_use]
pub fn abstract_preview(index: &HashMap<String, Vec<i64>>) -> Option<String> {
    let text = reconstruct_abstract(index).ok()?;
    if text.is_empty() {
        return None;
    }

    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return Some(text);
    }

    let mut preview: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push_str("...");
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(entries: &[(&str, &[i64])]) -> HashMap<String, Vec<i64>> {
        entries.iter().map(|(w, p)| ((*w).to_string(), p.to_vec())).collect()
    }

    #[test]
    fn test_reconstruction_is_positionally_exact() {
        let index = index_of(&[
            ("the", &[0, 4]),
            ("cat", &[1]),
            ("sat", &[2]),
            ("on", &[3]),
            ("mat", &[5]),
        ]);

        assert_eq!(reconstruct_abstract(&index).unwrap(), "the cat sat on the mat");
    }

    #[test]
    fn test_empty_index_reconstructs_to_empty() {
        assert_eq!(reconstruct_abstract(&HashMap::new()).unwrap(), "");
    }

    #[test]
    fn test_negative_position_fails_loudly() {
        let index = index_of(&[("bad", &[-1])]);
        assert!(reconstruct_abstract(&index).is_err());
    }

    #[test]
    fn test_duplicate_position_fails_loudly() {
        let index = index_of(&[("one", &[0]), ("two", &[0])]);
        assert!(reconstruct_abstract(&index).is_err());
    }

    #[test]
    fn test_preview_is_bounded_with_ellipsis() {
        let words: Vec<String> = (0..300).map(|i| format!("word{i}")).collect();
        let index: HashMap<String, Vec<i64>> =
            words.iter().enumerate().map(|(i, w)| (w.clone(), vec![i as i64])).collect();

        let preview = abstract_preview(&index).unwrap();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
    }

    #[test]
    fn test_short_preview_is_untruncated() {
        let index = index_of(&[("hello", &[0]), ("world", &[1])]);
        assert_eq!(abstract_preview(&index).as_deref(), Some("hello world"));
    }

    #[test]
    fn test_preview_swallows_malformed_index() {
        let index = index_of(&[("bad", &[-5])]);
        assert_eq!(abstract_preview(&index), None);
    }
}

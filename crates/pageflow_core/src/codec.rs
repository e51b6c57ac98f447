//! Serialized document form used by persistence and export.
//!
//! # Responsibility
//! - Join page contents with an explicit page-break marker.
//! - Split serialized text back into page contents for re-pagination.
//!
//! # Invariants
//! - The marker (`\x0C`, form feed) never occurs inside page content; reflow
//!   input normalization rewrites it to `\n`.
//! - Deserialized pages are not trusted to fit the current budget; callers
//!   settle them with the reflow engine.

use crate::reflow::text::normalize_line_breaks;
use crate::store::page_store::PageSequence;

/// Page-break marker between serialized pages.
pub const PAGE_BREAK: char = '\u{000C}';

/// Joins page contents with [`PAGE_BREAK`].
pub fn serialize_pages(pages: &PageSequence) -> String {
    let mut out = String::new();
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            out.push(PAGE_BREAK);
        }
        out.push_str(&page.content);
    }
    out
}

/// Splits serialized text into a fresh sequence (ids restart at 1).
///
/// Line endings are normalized. Empty fragments are dropped except a
/// trailing one, which is the only empty page a settled document may keep.
pub fn deserialize_pages(serialized: &str) -> PageSequence {
    let fragments: Vec<&str> = serialized.split(PAGE_BREAK).collect();
    let last = fragments.len() - 1;
    let contents = fragments
        .into_iter()
        .enumerate()
        .filter(|(index, fragment)| !fragment.is_empty() || *index == last)
        .map(|(_, fragment)| normalize_line_breaks(fragment).into_owned());
    PageSequence::from_contents(contents)
}

#[cfg(test)]
mod tests {
    use super::{deserialize_pages, serialize_pages, PAGE_BREAK};
    use crate::store::page_store::PageSequence;

    #[test]
    fn serialize_joins_with_marker() {
        let pages = PageSequence::from_contents(["a\nb", "c"]);
        assert_eq!(serialize_pages(&pages), format!("a\nb{PAGE_BREAK}c"));
    }

    #[test]
    fn deserialize_drops_interior_empty_fragments() {
        let pages = deserialize_pages("a\x0C\x0Cb\r\nc\x0C");
        assert_eq!(pages.contents(), vec!["a", "b\nc", ""]);
    }

    #[test]
    fn empty_input_is_a_blank_document() {
        assert!(deserialize_pages("").is_blank());
        assert!(deserialize_pages("\x0C").is_blank());
    }
}

//! Page domain model.
//!
//! # Responsibility
//! - Define the canonical page record owned by the page store.
//! - Define the transient focus target produced by one reflow step.
//!
//! # Invariants
//! - `PageId` values are assigned monotonically and never reused while the
//!   owning sequence lives.
//! - `FocusTarget::caret` counts Unicode scalar values, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable page identity.
///
/// Identity survives content changes; position in the sequence does not
/// have to match id order after merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl PageId {
    /// Id of the page created at document initialization.
    pub const FIRST: PageId = PageId(1);

    /// Returns the next id in allocation order.
    pub fn next(self) -> PageId {
        PageId(self.0 + 1)
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bounded unit of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// Plain text; lines are `\n`-delimited.
    pub content: String,
}

impl Page {
    pub fn new(id: PageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content length in chars, the unit used by caret offsets.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Number of logical lines. Empty content is one empty line.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Page and caret the input surface must restore after a reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub page_id: PageId,
    pub caret: usize,
}

impl FocusTarget {
    pub fn new(page_id: PageId, caret: usize) -> Self {
        Self { page_id, caret }
    }

    /// Caret at the start of `page_id`.
    pub fn start_of(page_id: PageId) -> Self {
        Self::new(page_id, 0)
    }

    /// Caret at the end of `page`.
    pub fn end_of(page: &Page) -> Self {
        Self::new(page.id, page.char_len())
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusTarget, Page, PageId};

    #[test]
    fn empty_page_has_one_line_and_zero_chars() {
        let page = Page::new(PageId::FIRST, "");
        assert!(page.is_empty());
        assert_eq!(page.line_count(), 1);
        assert_eq!(page.char_len(), 0);
    }

    #[test]
    fn char_len_counts_scalars_not_bytes() {
        let page = Page::new(PageId(4), "héllo\n日本");
        assert_eq!(page.char_len(), 8);
        assert_eq!(page.line_count(), 2);
        assert_eq!(FocusTarget::end_of(&page), FocusTarget::new(PageId(4), 8));
    }

    #[test]
    fn page_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&PageId(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(PageId(7).next(), PageId(8));
    }
}

//! Ordered page sequence and its structural mutations.
//!
//! # Responsibility
//! - Own every page of one document, in order.
//! - Provide insertion, removal and verbatim content replacement.
//!
//! # Invariants
//! - The sequence always holds at least one page.
//! - Fresh ids come from a high-water mark, so an id is never handed out twice
//!   even after the page holding it was removed.
//! - No capacity checks happen here; callers run the reflow engine afterwards.

use crate::model::page::{Page, PageId};
use log::debug;

/// Proof that a page has a predecessor and can be merged backwards into it.
///
/// Only [`PageSequence::merge_target`] constructs this, so the first page can
/// never be handed to a backward merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeTarget {
    page_id: PageId,
    previous_id: PageId,
}

impl MergeTarget {
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn previous_id(&self) -> PageId {
        self.previous_id
    }
}

/// Ordered, never-empty list of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSequence {
    pages: Vec<Page>,
    next_id: PageId,
}

impl Default for PageSequence {
    fn default() -> Self {
        Self::create_initial()
    }
}

impl PageSequence {
    /// Creates a document with exactly one empty page, id 1.
    pub fn create_initial() -> Self {
        Self {
            pages: vec![Page::new(PageId::FIRST, String::new())],
            next_id: PageId::FIRST.next(),
        }
    }

    /// Builds a sequence from page contents in order, ids starting at 1.
    ///
    /// An empty iterator yields the initial single-page document.
    pub fn from_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next_id = PageId::FIRST;
        let mut pages = Vec::new();
        for content in contents {
            pages.push(Page::new(next_id, content));
            next_id = next_id.next();
        }
        if pages.is_empty() {
            return Self::create_initial();
        }
        Self { pages, next_id }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|page| page.id).collect()
    }

    pub fn contents(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.content.as_str()).collect()
    }

    pub fn first(&self) -> &Page {
        &self.pages[0]
    }

    pub fn last(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    pub fn page(&self, page_id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == page_id)
    }

    pub fn content(&self, page_id: PageId) -> Option<&str> {
        self.page(page_id).map(|page| page.content.as_str())
    }

    pub fn position_of(&self, page_id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id == page_id)
    }

    /// 1-based page number shown to the user.
    pub fn page_number(&self, page_id: PageId) -> Option<usize> {
        self.position_of(page_id).map(|index| index + 1)
    }

    pub fn next_of(&self, page_id: PageId) -> Option<PageId> {
        let index = self.position_of(page_id)?;
        self.pages.get(index + 1).map(|page| page.id)
    }

    pub fn previous_of(&self, page_id: PageId) -> Option<PageId> {
        let index = self.position_of(page_id)?;
        index
            .checked_sub(1)
            .and_then(|prev| self.pages.get(prev))
            .map(|page| page.id)
    }

    /// Whether the whole document is a single empty page.
    pub fn is_blank(&self) -> bool {
        self.pages.len() == 1 && self.pages[0].is_empty()
    }

    /// Flat document text: page contents joined by one line break each.
    pub fn text(&self) -> String {
        self.contents().join("\n")
    }

    /// Returns a merge capability for `page_id` when it has a predecessor.
    pub fn merge_target(&self, page_id: PageId) -> Option<MergeTarget> {
        let previous_id = self.previous_of(page_id)?;
        Some(MergeTarget {
            page_id,
            previous_id,
        })
    }

    /// Replaces page content verbatim.
    ///
    /// Returns `false` and leaves the sequence untouched when `page_id` is
    /// absent.
    pub fn set_content(&mut self, page_id: PageId, text: impl Into<String>) -> bool {
        match self.pages.iter_mut().find(|page| page.id == page_id) {
            Some(page) => {
                page.content = text.into();
                true
            }
            None => {
                debug!(
                    "event=page_set_content module=store status=skipped reason=unknown_page page_id={page_id}"
                );
                false
            }
        }
    }

    /// Inserts a page with a fresh id right after `page_id`.
    pub fn insert_page_after(
        &mut self,
        page_id: PageId,
        content: impl Into<String>,
    ) -> Option<PageId> {
        let index = self.position_of(page_id)?;
        Some(self.insert_at(index + 1, content.into()))
    }

    /// Removes `page_id`. Refused for the sole remaining page.
    pub fn remove_page(&mut self, page_id: PageId) -> Option<Page> {
        if self.pages.len() == 1 {
            debug!(
                "event=page_remove module=store status=skipped reason=sole_page page_id={page_id}"
            );
            return None;
        }
        let index = self.position_of(page_id)?;
        Some(self.pages.remove(index))
    }

    pub(crate) fn id_at(&self, index: usize) -> PageId {
        self.pages[index].id
    }

    pub(crate) fn content_at(&self, index: usize) -> &str {
        &self.pages[index].content
    }

    pub(crate) fn content_mut_at(&mut self, index: usize) -> &mut String {
        &mut self.pages[index].content
    }

    pub(crate) fn insert_at(&mut self, index: usize, content: String) -> PageId {
        let id = self.next_id;
        self.next_id = id.next();
        self.pages.insert(index, Page::new(id, content));
        id
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Option<Page> {
        if self.pages.len() == 1 || index >= self.pages.len() {
            return None;
        }
        Some(self.pages.remove(index))
    }
}

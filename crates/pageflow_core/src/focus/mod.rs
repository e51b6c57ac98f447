//! Focus application after reflow.
//!
//! # Responsibility
//! - Hold the focus target produced by the last reflow until the input
//!   surface is ready to take it (next tick).
//! - Resolve page ids to live input handles through a capability, so the
//!   core never stores handle references.
//!
//! # Invariants
//! - At most one focus target is pending; a newer one replaces it.
//! - A target whose page has no mounted handle stays pending.

use crate::model::page::{FocusTarget, PageId};
use log::{debug, warn};
use std::collections::HashMap;

pub mod navigation;

/// Input surface capability: focuses the editable element of a page.
pub trait FocusSurface {
    /// Returns `false` when no input handle is mounted for `page_id`.
    fn focus_page(&mut self, page_id: PageId, caret: usize) -> bool;
}

/// One editable element of the rendering surface.
pub trait InputHandle {
    fn focus_at(&mut self, caret: usize);
}

/// Page id to input handle map owned by the rendering side.
#[derive(Debug)]
pub struct HandleRegistry<H> {
    handles: HashMap<PageId, H>,
}

impl<H> Default for HandleRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> HandleRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, page_id: PageId, handle: H) -> Option<H> {
        self.handles.insert(page_id, handle)
    }

    pub fn unregister(&mut self, page_id: PageId) -> Option<H> {
        self.handles.remove(&page_id)
    }

    pub fn get(&self, page_id: PageId) -> Option<&H> {
        self.handles.get(&page_id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drops handles of pages no longer in `live_pages`.
    pub fn retain_pages(&mut self, live_pages: &[PageId]) {
        self.handles.retain(|page_id, _| live_pages.contains(page_id));
    }
}

impl<H: InputHandle> FocusSurface for HandleRegistry<H> {
    fn focus_page(&mut self, page_id: PageId, caret: usize) -> bool {
        match self.handles.get_mut(&page_id) {
            Some(handle) => {
                handle.focus_at(caret);
                true
            }
            None => false,
        }
    }
}

/// Defers focus application until the surface has committed the mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusController {
    active: Option<FocusTarget>,
    pending: Option<FocusTarget>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `target` for the next flush.
    pub fn schedule(&mut self, target: FocusTarget) {
        self.pending = Some(target);
    }

    pub fn pending(&self) -> Option<FocusTarget> {
        self.pending
    }

    /// Last target the surface accepted.
    pub fn active(&self) -> Option<FocusTarget> {
        self.active
    }

    /// Current caret as the core sees it: pending first, then active.
    pub fn current(&self) -> Option<FocusTarget> {
        self.pending.or(self.active)
    }

    /// Applies the pending target. Returns it when the surface accepted it.
    pub fn flush(&mut self, surface: &mut dyn FocusSurface) -> Option<FocusTarget> {
        let target = self.pending?;
        if surface.focus_page(target.page_id, target.caret) {
            debug!(
                "event=focus_apply module=focus status=ok page_id={} caret={}",
                target.page_id, target.caret
            );
            self.active = Some(target);
            self.pending = None;
            Some(target)
        } else {
            warn!(
                "event=focus_apply module=focus status=skipped reason=handle_missing page_id={}",
                target.page_id
            );
            None
        }
    }

    /// Forgets everything, e.g. after the document was replaced.
    pub fn reset(&mut self) {
        self.active = None;
        self.pending = None;
    }
}

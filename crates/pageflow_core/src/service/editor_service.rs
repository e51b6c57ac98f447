//! Editor session: one open document and its input pipeline.
//!
//! # Responsibility
//! - Own the page sequence, style state and focus of one document.
//! - Queue input events and run each one's cascade to completion, in order.
//! - Reject precondition violations (unknown page, merge at first page)
//!   as no-ops before they reach the engine.
//!
//! # Invariants
//! - Events are processed strictly FIFO; none is dropped or coalesced.
//! - Between calls the sequence is always settled.

use crate::capacity::{CapacityOracle, CapacityPolicy};
use crate::codec::serialize_pages;
use crate::focus::navigation::{navigate, Key};
use crate::focus::{FocusController, FocusSurface};
use crate::model::document::DocumentId;
use crate::model::page::{FocusTarget, PageId};
use crate::model::style::{StylePatch, StyleState};
use crate::reflow::{ReflowEngine, ReflowOutcome};
use crate::store::page_store::PageSequence;
use log::{debug, info, warn};
use std::collections::VecDeque;
use uuid::Uuid;

/// Raw input event as delivered by the input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Full content of one page after a keystroke, with the caret after it.
    Edit {
        page_id: PageId,
        content: String,
        caret: usize,
    },
    /// Clipboard text inserted at `caret`.
    Paste {
        page_id: PageId,
        caret: usize,
        text: String,
    },
    /// Backspace at offset 0 of `page_id`.
    MergeBackward { page_id: PageId },
}

impl EditorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "edit",
            Self::Paste { .. } => "paste",
            Self::MergeBackward { .. } => "merge_backward",
        }
    }

    pub fn page_id(&self) -> PageId {
        match self {
            Self::Edit { page_id, .. }
            | Self::Paste { page_id, .. }
            | Self::MergeBackward { page_id } => *page_id,
        }
    }
}

/// One open, paginated document.
pub struct EditorSession<O = CapacityPolicy> {
    document_id: DocumentId,
    pages: PageSequence,
    style: StyleState,
    engine: ReflowEngine<O>,
    focus: FocusController,
    inbox: VecDeque<EditorEvent>,
}

impl<O: CapacityOracle> EditorSession<O> {
    /// Starts a new blank document with focus on the first page.
    pub fn new(engine: ReflowEngine<O>) -> Self {
        Self::restore(
            Uuid::new_v4(),
            PageSequence::create_initial(),
            StyleState::default(),
            engine,
        )
    }

    /// Reopens a document from restored pages.
    ///
    /// Restored pages are settled against this engine's budget first.
    pub fn restore(
        document_id: DocumentId,
        mut pages: PageSequence,
        style: StyleState,
        engine: ReflowEngine<O>,
    ) -> Self {
        let first_page = FocusTarget::start_of(pages.first().id);
        let outcome = engine.settle(&mut pages, first_page);
        info!(
            "event=session_open module=service status=ok page_count={} splits={}",
            pages.page_count(),
            outcome.splits
        );

        let mut focus = FocusController::new();
        focus.schedule(outcome.focus);
        Self {
            document_id,
            pages,
            style,
            engine,
            focus,
            inbox: VecDeque::new(),
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn pages(&self) -> &PageSequence {
        &self.pages
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn engine(&self) -> &ReflowEngine<O> {
        &self.engine
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn page_number(&self, page_id: PageId) -> Option<usize> {
        self.pages.page_number(page_id)
    }

    /// Serialized form for persistence collaborators.
    pub fn serialize(&self) -> String {
        serialize_pages(&self.pages)
    }

    /// Queues an event without processing it.
    pub fn submit(&mut self, event: EditorEvent) {
        self.inbox.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.inbox.len()
    }

    /// Processes queued events in arrival order.
    ///
    /// Returns the focus produced by the last accepted event, which is also
    /// scheduled on the focus controller.
    pub fn process_pending(&mut self) -> Option<FocusTarget> {
        let mut last_focus = None;
        while let Some(event) = self.inbox.pop_front() {
            if let Some(outcome) = self.process(event) {
                self.focus.schedule(outcome.focus);
                last_focus = Some(outcome.focus);
            }
        }
        last_focus
    }

    /// Queues `event` and drains the inbox.
    pub fn apply(&mut self, event: EditorEvent) -> Option<FocusTarget> {
        self.submit(event);
        self.process_pending()
    }

    /// Handles keys with cross-page meaning.
    ///
    /// Backspace only matters at offset 0; arrows only at page edges.
    /// Returns `None` when the key stays within the page.
    pub fn handle_key(&mut self, page_id: PageId, caret: usize, key: Key) -> Option<FocusTarget> {
        match key {
            Key::Backspace if caret == 0 => self.apply(EditorEvent::MergeBackward { page_id }),
            Key::Backspace => None,
            Key::ArrowUp | Key::ArrowDown => {
                self.process_pending();
                let target = navigate(&self.pages, FocusTarget::new(page_id, caret), key)?;
                self.focus.schedule(target);
                Some(target)
            }
        }
    }

    /// Applies the scheduled focus to the surface (next tick).
    pub fn flush_focus(&mut self, surface: &mut dyn FocusSurface) -> Option<FocusTarget> {
        self.focus.flush(surface)
    }

    /// Resets to a single empty page. Document identity is kept.
    pub fn clear(&mut self) -> FocusTarget {
        self.inbox.clear();
        self.pages = PageSequence::create_initial();
        self.focus.reset();
        let target = FocusTarget::start_of(self.pages.first().id);
        self.focus.schedule(target);
        info!("event=session_clear module=service status=ok");
        target
    }

    /// Updates the uniform style. Pagination is not affected.
    pub fn apply_style(&mut self, patch: StylePatch) -> &StyleState {
        self.style.apply(patch);
        &self.style
    }

    fn process(&mut self, event: EditorEvent) -> Option<ReflowOutcome> {
        let kind = event.kind();
        let page_id = event.page_id();
        let outcome = match event {
            EditorEvent::Edit {
                page_id,
                content,
                caret,
            } => self.engine.edit(&mut self.pages, page_id, &content, caret),
            EditorEvent::Paste {
                page_id,
                caret,
                text,
            } => self.engine.paste(&mut self.pages, page_id, caret, &text),
            EditorEvent::MergeBackward { page_id } => match self.pages.merge_target(page_id) {
                Some(target) => self.engine.backward_merge(&mut self.pages, target),
                None => {
                    debug!(
                        "event=session_event module=service kind={kind} status=skipped reason=no_previous_page page_id={page_id}"
                    );
                    return None;
                }
            },
        };

        if outcome.is_none() {
            warn!(
                "event=session_event module=service kind={kind} status=skipped reason=unknown_page page_id={page_id}"
            );
        }
        outcome
    }
}

//! Split/carry/merge algorithm over a page sequence.
//!
//! # Responsibility
//! - Apply edit, paste and backward-merge mutations to a `PageSequence`.
//! - Run the overflow cascade to a fixed point after every mutation.
//! - Compute the focus target the input surface must restore.
//!
//! # Invariants
//! - A cascade is an explicit loop; stack depth does not grow with the
//!   number of pages.
//! - A split consumes exactly one `\n`, which becomes the page break, so
//!   `PageSequence::text()` is unchanged by a cascade.
//! - After any operation returns, no page overflows under the oracle.
//! - Downstream content is prepended onto, never overwritten.
//! - A split never leaves an empty page behind: a blank first line stays
//!   with the line after it.
//! - Every returned focus caret is within its page's content.

use crate::capacity::{split_at_line, CapacityOracle, CapacityPolicy, Constraints, Verdict};
use crate::model::page::{FocusTarget, PageId};
use crate::reflow::text::{byte_offset, char_len, normalize_line_breaks, normalize_with_caret};
use crate::reflow::{FocusConvention, ReflowOutcome};
use crate::store::page_store::{MergeTarget, PageSequence};
use log::{debug, warn};

/// Caret position followed through splits, by sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackedCaret {
    index: usize,
    caret: usize,
}

impl TrackedCaret {
    /// Position after page `index` kept `head_chars` chars and moved the rest
    /// to the front of page `receiving`.
    fn after_split(self, index: usize, head_chars: usize, receiving: usize) -> Self {
        if self.index == index && self.caret > head_chars {
            Self {
                index: receiving,
                caret: self.caret - head_chars - 1,
            }
        } else {
            self
        }
    }
}

/// Text moved off the page a cascade started from.
#[derive(Debug, Clone, Copy)]
struct Carry {
    /// First page that received carried text.
    first_index: usize,
    /// End of the carried text, followed through later splits.
    end: TrackedCaret,
}

#[derive(Debug)]
struct CascadeReport {
    tracked: TrackedCaret,
    carry: Option<Carry>,
    splits: usize,
    pages_created: usize,
}

/// Reflow engine bound to one oracle and one page budget.
#[derive(Debug, Clone)]
pub struct ReflowEngine<O = CapacityPolicy> {
    oracle: O,
    constraints: Constraints,
    focus_convention: FocusConvention,
}

impl ReflowEngine<CapacityPolicy> {
    /// Engine using the built-in policy matching `constraints`.
    pub fn with_constraints(constraints: Constraints) -> Self {
        Self::new(CapacityPolicy::from_constraints(&constraints), constraints)
    }
}

impl<O: CapacityOracle> ReflowEngine<O> {
    pub fn new(oracle: O, constraints: Constraints) -> Self {
        Self {
            oracle,
            constraints,
            focus_convention: FocusConvention::default(),
        }
    }

    pub fn with_focus_convention(mut self, focus_convention: FocusConvention) -> Self {
        self.focus_convention = focus_convention;
        self
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn focus_convention(&self) -> FocusConvention {
        self.focus_convention
    }

    /// Oracle verdict as the cascade applies it.
    ///
    /// A split at line 0 or past the last line would never make progress and
    /// is downgraded to `Fits`. A split that would leave only a blank first
    /// line behind moves one line further, so the blank line stays with the
    /// line after it; when there is no further boundary the page fits.
    pub fn evaluate(&self, content: &str) -> Verdict {
        let split_line = match self.oracle.evaluate(content, &self.constraints) {
            Verdict::Fits => return Verdict::Fits,
            Verdict::Overflow { split_line } => split_line,
        };
        let Some((head, _)) = split_at_line(content, split_line) else {
            warn!(
                "event=oracle_verdict module=reflow status=error error_code=split_out_of_range split_line={split_line}"
            );
            return Verdict::Fits;
        };
        if !head.is_empty() {
            return Verdict::Overflow { split_line };
        }
        let split_line = split_line + 1;
        match split_at_line(content, split_line) {
            Some(_) => Verdict::Overflow { split_line },
            None => Verdict::Fits,
        }
    }

    /// Whether every page fits its budget.
    pub fn is_settled(&self, pages: &PageSequence) -> bool {
        pages
            .iter()
            .all(|page| !self.evaluate(&page.content).is_overflow())
    }

    /// Replaces the content of `page_id` and reflows.
    ///
    /// `caret` is where the edit left the cursor. Returns `None` when
    /// `page_id` is not in the sequence.
    pub fn edit(
        &self,
        pages: &mut PageSequence,
        page_id: PageId,
        content: &str,
        caret: usize,
    ) -> Option<ReflowOutcome> {
        let index = pages.position_of(page_id)?;
        let (content, caret) = normalize_with_caret(content, caret);

        if content.is_empty() && pages.page_count() > 1 {
            return Some(self.remove_emptied(pages, index));
        }

        *pages.content_mut_at(index) = content;
        let report = self.cascade(pages, index, TrackedCaret { index, caret });
        let focus = match report.carry {
            None => FocusTarget::new(page_id, caret),
            Some(carry) => match self.focus_convention {
                FocusConvention::CarryEnd => tracked_focus(pages, carry.end),
                FocusConvention::CarryStart => {
                    FocusTarget::start_of(pages.id_at(carry.first_index))
                }
                FocusConvention::TrackCaret => tracked_focus(pages, report.tracked),
            },
        };

        let outcome = ReflowOutcome {
            focus,
            splits: report.splits,
            pages_created: report.pages_created,
            pages_removed: 0,
        };
        log_outcome("edit", page_id, &outcome);
        Some(outcome)
    }

    /// Inserts `text` at `caret` of `page_id` and reflows the combined stream.
    ///
    /// Focus lands right after the pasted text, on whichever page holds it.
    pub fn paste(
        &self,
        pages: &mut PageSequence,
        page_id: PageId,
        caret: usize,
        text: &str,
    ) -> Option<ReflowOutcome> {
        let index = pages.position_of(page_id)?;
        let pasted = normalize_line_breaks(text);

        let current = pages.content_at(index);
        let split = byte_offset(current, caret);
        let (head, tail) = current.split_at(split);
        let caret_after = char_len(head) + char_len(&pasted);
        let combined = format!("{head}{pasted}{tail}");
        *pages.content_mut_at(index) = combined;

        let report = self.cascade(
            pages,
            index,
            TrackedCaret {
                index,
                caret: caret_after,
            },
        );
        let outcome = ReflowOutcome {
            focus: tracked_focus(pages, report.tracked),
            splits: report.splits,
            pages_created: report.pages_created,
            pages_removed: 0,
        };
        log_outcome("paste", page_id, &outcome);
        Some(outcome)
    }

    /// Appends the target page onto its predecessor and removes it.
    ///
    /// A single line break separates the two unless the predecessor is empty.
    /// Returns `None` when the target no longer matches the sequence.
    pub fn backward_merge(
        &self,
        pages: &mut PageSequence,
        target: MergeTarget,
    ) -> Option<ReflowOutcome> {
        let index = pages.position_of(target.page_id())?;
        if index == 0 || pages.id_at(index - 1) != target.previous_id() {
            debug!(
                "event=reflow module=reflow kind=backward_merge status=skipped reason=stale_target page_id={}",
                target.page_id()
            );
            return None;
        }

        let removed = pages.remove_at(index)?;
        let previous_index = index - 1;
        let previous = pages.content_mut_at(previous_index);
        let caret = char_len(previous);
        if !previous.is_empty() {
            previous.push('\n');
        }
        previous.push_str(&removed.content);

        let report = self.cascade(
            pages,
            previous_index,
            TrackedCaret {
                index: previous_index,
                caret,
            },
        );
        let outcome = ReflowOutcome {
            focus: tracked_focus(pages, report.tracked),
            splits: report.splits,
            pages_created: report.pages_created,
            pages_removed: 1,
        };
        log_outcome("backward_merge", target.page_id(), &outcome);
        Some(outcome)
    }

    /// Reflows every page front to back, keeping `focus` on its character.
    ///
    /// On an already settled sequence this changes nothing and returns the
    /// same focus.
    pub fn settle(&self, pages: &mut PageSequence, focus: FocusTarget) -> ReflowOutcome {
        let mut tracked = match pages.position_of(focus.page_id) {
            Some(index) => TrackedCaret {
                index,
                caret: focus.caret.min(char_len(pages.content_at(index))),
            },
            None => TrackedCaret { index: 0, caret: 0 },
        };

        let mut splits = 0;
        let mut pages_created = 0;
        let mut index = 0;
        while index < pages.page_count() {
            let report = self.cascade(pages, index, tracked);
            tracked = report.tracked;
            splits += report.splits;
            pages_created += report.pages_created;
            index += 1;
        }

        let outcome = ReflowOutcome {
            focus: tracked_focus(pages, tracked),
            splits,
            pages_created,
            pages_removed: 0,
        };
        log_outcome("settle", focus.page_id, &outcome);
        outcome
    }

    /// Paginates flat text from scratch.
    pub fn repaginate(&self, text: &str) -> PageSequence {
        let mut pages = PageSequence::from_contents([normalize_line_breaks(text).into_owned()]);
        self.settle(&mut pages, FocusTarget::start_of(PageId::FIRST));
        pages
    }

    fn remove_emptied(&self, pages: &mut PageSequence, index: usize) -> ReflowOutcome {
        let removed_id = pages.id_at(index);
        let removed = pages.remove_at(index).is_some();
        let focus = if index > 0 {
            let previous = &pages.pages()[index - 1];
            FocusTarget::end_of(previous)
        } else {
            FocusTarget::start_of(pages.first().id)
        };

        let outcome = ReflowOutcome {
            focus,
            splits: 0,
            pages_created: 0,
            pages_removed: usize::from(removed),
        };
        log_outcome("edit", removed_id, &outcome);
        outcome
    }

    /// Carry loop: split the page at `start` while it overflows, pushing the
    /// remainder onto the following page, then continue with that page.
    fn cascade(
        &self,
        pages: &mut PageSequence,
        start: usize,
        mut tracked: TrackedCaret,
    ) -> CascadeReport {
        let mut report = CascadeReport {
            tracked,
            carry: None,
            splits: 0,
            pages_created: 0,
        };

        let mut index = start;
        loop {
            let split_line = match self.evaluate(pages.content_at(index)) {
                Verdict::Fits => break,
                Verdict::Overflow { split_line } => split_line,
            };
            let Some((head, tail)) = split_at_line(pages.content_at(index), split_line) else {
                break;
            };
            let head_chars = char_len(head);
            let tail_chars = char_len(tail);
            let (head, tail) = (head.to_string(), tail.to_string());

            *pages.content_mut_at(index) = head;
            let receiving = index + 1;
            if receiving < pages.page_count() {
                let next = pages.content_mut_at(receiving);
                next.insert(0, '\n');
                next.insert_str(0, &tail);
            } else {
                pages.insert_at(receiving, tail);
                report.pages_created += 1;
            }
            report.splits += 1;

            tracked = tracked.after_split(index, head_chars, receiving);
            report.carry = Some(match report.carry {
                None => Carry {
                    first_index: receiving,
                    end: TrackedCaret {
                        index: receiving,
                        caret: tail_chars,
                    },
                },
                Some(carry) => Carry {
                    end: carry.end.after_split(index, head_chars, receiving),
                    ..carry
                },
            });
            index = receiving;
        }

        report.tracked = tracked;
        report
    }
}

fn tracked_focus(pages: &PageSequence, tracked: TrackedCaret) -> FocusTarget {
    FocusTarget::new(pages.id_at(tracked.index), tracked.caret)
}

fn log_outcome(kind: &str, page_id: PageId, outcome: &ReflowOutcome) {
    debug!(
        "event=reflow module=reflow kind={kind} status=ok page_id={page_id} splits={} pages_created={} pages_removed={} focus_page={} focus_caret={}",
        outcome.splits,
        outcome.pages_created,
        outcome.pages_removed,
        outcome.focus.page_id,
        outcome.focus.caret
    );
}

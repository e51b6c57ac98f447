//! Reflow engine: the pagination state machine.
//!
//! # Responsibility
//! - Turn one content mutation into a settled page sequence plus a focus
//!   target.
//! - Keep the page budget, content order and page identities consistent
//!   across splits and merges.
//!
//! # Invariants
//! - Exactly one mutation runs to its fixed point at a time; callers queue
//!   the rest (see `service::editor_service`).
//! - Precondition violations (unknown page, merge at the first page) are
//!   rejected before any mutation and leave the sequence untouched.

use crate::model::page::FocusTarget;
use serde::{Deserialize, Serialize};

pub mod engine;
pub mod text;

pub use engine::ReflowEngine;

/// Where the caret goes when an edit spills content onto the next page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusConvention {
    /// First receiving page, right after the carried-over text.
    #[default]
    CarryEnd,
    /// First receiving page, at its start.
    CarryStart,
    /// Wherever the caret's character ended up.
    TrackCaret,
}

impl FocusConvention {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CarryEnd => "carry_end",
            Self::CarryStart => "carry_start",
            Self::TrackCaret => "track_caret",
        }
    }
}

/// Result of one settled reflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowOutcome {
    /// Focus the input surface must restore next.
    pub focus: FocusTarget,
    pub splits: usize,
    pub pages_created: usize,
    pub pages_removed: usize,
}

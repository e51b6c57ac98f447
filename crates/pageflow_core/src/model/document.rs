//! Persisted document record.
//!
//! # Invariants
//! - `document_id` is stable across save/load cycles of the same document.
//! - `content` is the serialized page form (see `codec`), never assumed to
//!   fit the current page budget.

use crate::model::style::StyleState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of one document across saves.
pub type DocumentId = Uuid;

/// One saved document in a named storage slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub slot: String,
    pub document_id: DocumentId,
    /// Page contents joined with the page-break marker.
    pub content: String,
    pub style: StyleState,
    /// Page count at save time; informational only.
    pub page_count: u32,
    /// Unix epoch milliseconds, filled on read.
    pub updated_at: Option<i64>,
}

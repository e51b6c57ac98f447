//! Pagination and reflow core for multi-page text documents.
//! This crate is the single source of truth for page boundaries, page
//! identity and caret placement across structural edits.

pub mod capacity;
pub mod codec;
pub mod config;
pub mod db;
pub mod focus;
pub mod logging;
pub mod model;
pub mod reflow;
pub mod repo;
pub mod service;
pub mod store;

pub use capacity::{
    CapacityOracle, CapacityPolicy, Constraints, LineCountOracle, Verdict, WrappedLineOracle,
};
pub use codec::{deserialize_pages, serialize_pages, PAGE_BREAK};
pub use config::{ConfigError, PagerConfig};
pub use focus::navigation::{navigate, Key};
pub use focus::{FocusController, FocusSurface, HandleRegistry, InputHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{DocumentId, DocumentRecord};
pub use model::page::{FocusTarget, Page, PageId};
pub use model::style::{StylePatch, StyleState};
pub use reflow::{FocusConvention, ReflowEngine, ReflowOutcome};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use service::document_service::{
    export_text, import_text, DocumentService, DocumentServiceError,
};
pub use service::editor_service::{EditorEvent, EditorSession};
pub use store::page_store::{MergeTarget, PageSequence};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

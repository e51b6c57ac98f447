//! Save/load/export use-cases for editor sessions.
//!
//! # Responsibility
//! - Persist a session's serialized pages and style under a storage slot.
//! - Rebuild a session from storage, re-running pagination on load.
//! - Export/import the serialized form as a plain file.
//!
//! # Invariants
//! - A missing saved document is `Ok(None)`, not an error.
//! - Loaded content is always settled against the caller's engine; stored
//!   page boundaries are a hint, not a contract.

use crate::capacity::CapacityOracle;
use crate::codec::deserialize_pages;
use crate::model::document::DocumentRecord;
use crate::reflow::ReflowEngine;
use crate::repo::document_repo::{normalize_slot, DocumentRepository, RepoError};
use crate::service::editor_service::EditorSession;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

/// Service error for document persistence use-cases.
#[derive(Debug)]
pub enum DocumentServiceError {
    InvalidSlot(String),
    Repo(RepoError),
    Io(std::io::Error),
    /// Write succeeded but read-back disagreed.
    InconsistentState(&'static str),
}

impl Display for DocumentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSlot(slot) => write!(f, "invalid storage slot: `{slot}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "document file error: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent document state: {details}"),
        }
    }
}

impl Error for DocumentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidSlot(_) | Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for DocumentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidSlot(slot) => Self::InvalidSlot(slot),
            other => Self::Repo(other),
        }
    }
}

impl From<std::io::Error> for DocumentServiceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Document persistence facade over a repository implementation.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves `session` into `slot`, replacing what was there.
    pub fn save<O: CapacityOracle>(
        &self,
        session: &EditorSession<O>,
        slot: &str,
    ) -> Result<DocumentRecord, DocumentServiceError> {
        let started_at = Instant::now();
        let slot =
            normalize_slot(slot).ok_or_else(|| DocumentServiceError::InvalidSlot(slot.to_string()))?;
        let record = DocumentRecord {
            slot: slot.clone(),
            document_id: session.document_id(),
            content: session.serialize(),
            style: session.style().clone(),
            page_count: u32::try_from(session.page_count()).unwrap_or(u32::MAX),
            updated_at: None,
        };

        if let Err(err) = self.repo.save_document(&record) {
            error!(
                "event=document_save module=service status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }

        let saved = self
            .repo
            .load_document(&slot)?
            .ok_or(DocumentServiceError::InconsistentState(
                "saved document not found in read-back",
            ))?;
        info!(
            "event=document_save module=service status=ok page_count={} duration_ms={}",
            saved.page_count,
            started_at.elapsed().as_millis()
        );
        Ok(saved)
    }

    /// Loads `slot` into a new session paginated by `engine`.
    ///
    /// Returns `Ok(None)` when nothing was saved there.
    pub fn load<O: CapacityOracle>(
        &self,
        slot: &str,
        engine: ReflowEngine<O>,
    ) -> Result<Option<EditorSession<O>>, DocumentServiceError> {
        let Some(record) = self.repo.load_document(slot)? else {
            info!("event=document_load module=service status=skipped reason=not_found");
            return Ok(None);
        };

        let pages = deserialize_pages(&record.content);
        let session = EditorSession::restore(record.document_id, pages, record.style, engine);
        info!(
            "event=document_load module=service status=ok stored_pages={} page_count={}",
            record.page_count,
            session.page_count()
        );
        Ok(Some(session))
    }

    pub fn delete(&self, slot: &str) -> Result<(), DocumentServiceError> {
        self.repo.delete_document(slot)?;
        Ok(())
    }

    /// Saved slots, most recently updated first.
    pub fn list_slots(&self) -> Result<Vec<String>, DocumentServiceError> {
        Ok(self.repo.list_slots()?)
    }
}

/// Writes the serialized pages of `session` to `path`.
///
/// Pages are separated by form feeds, which printers and pagers treat as
/// page breaks.
pub fn export_text<O: CapacityOracle>(
    session: &EditorSession<O>,
    path: impl AsRef<Path>,
) -> Result<(), DocumentServiceError> {
    std::fs::write(path, session.serialize())?;
    info!(
        "event=document_export module=service status=ok page_count={}",
        session.page_count()
    );
    Ok(())
}

/// Reads a text file (optionally form-feed separated) into a new session.
pub fn import_text<O: CapacityOracle>(
    path: impl AsRef<Path>,
    engine: ReflowEngine<O>,
) -> Result<EditorSession<O>, DocumentServiceError> {
    let raw = std::fs::read_to_string(path)?;
    let pages = deserialize_pages(&raw);
    Ok(EditorSession::restore(
        Uuid::new_v4(),
        pages,
        Default::default(),
        engine,
    ))
}

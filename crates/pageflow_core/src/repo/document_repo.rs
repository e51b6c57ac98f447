//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Save, load, delete and list documents by storage slot.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Slots are trimmed, non-empty and at most `MAX_SLOT_CHARS` chars.
//! - Saving to an existing slot replaces it (last write wins).
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::document::{DocumentId, DocumentRecord};
use crate::model::style::StyleState;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const MAX_SLOT_CHARS: usize = 128;

const DOCUMENT_SELECT_SQL: &str = "SELECT
    slot,
    document_id,
    content,
    style_json,
    page_count,
    updated_at
FROM documents";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidSlot(String),
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidSlot(slot) => write!(f, "invalid storage slot: `{slot}`"),
            Self::NotFound(slot) => write!(f, "no saved document in slot `{slot}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidSlot(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Trims a slot name; `None` when blank or too long.
pub fn normalize_slot(slot: &str) -> Option<String> {
    let trimmed = slot.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_SLOT_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

/// Repository interface for saved documents.
pub trait DocumentRepository {
    fn save_document(&self, record: &DocumentRecord) -> RepoResult<()>;
    fn load_document(&self, slot: &str) -> RepoResult<Option<DocumentRecord>>;
    fn delete_document(&self, slot: &str) -> RepoResult<()>;
    /// Slots ordered by `updated_at DESC, slot ASC`.
    fn list_slots(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn save_document(&self, record: &DocumentRecord) -> RepoResult<()> {
        let slot = require_slot(&record.slot)?;
        let style_json = serde_json::to_string(&record.style)
            .map_err(|err| RepoError::InvalidData(format!("style encode failed: {err}")))?;

        self.conn.execute(
            "INSERT INTO documents (
                slot,
                document_id,
                content,
                style_json,
                page_count
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(slot) DO UPDATE SET
                document_id = excluded.document_id,
                content = excluded.content,
                style_json = excluded.style_json,
                page_count = excluded.page_count,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                slot,
                record.document_id.to_string(),
                record.content.as_str(),
                style_json,
                i64::from(record.page_count.max(1)),
            ],
        )?;
        Ok(())
    }

    fn load_document(&self, slot: &str) -> RepoResult<Option<DocumentRecord>> {
        let slot = require_slot(slot)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE slot = ?1;"))?;
        let raw = stmt
            .query_row([slot.as_str()], RawDocumentRow::from_row)
            .optional()?;
        raw.map(RawDocumentRow::into_record).transpose()
    }

    fn delete_document(&self, slot: &str) -> RepoResult<()> {
        let slot = require_slot(slot)?;
        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE slot = ?1;", [slot.as_str()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(slot));
        }
        Ok(())
    }

    fn list_slots(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT slot FROM documents ORDER BY updated_at DESC, slot ASC;")?;
        let slots = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(slots)
    }
}

fn require_slot(slot: &str) -> RepoResult<String> {
    normalize_slot(slot).ok_or_else(|| RepoError::InvalidSlot(slot.to_string()))
}

/// Row as stored, before domain validation.
struct RawDocumentRow {
    slot: String,
    document_id: String,
    content: String,
    style_json: String,
    page_count: i64,
    updated_at: i64,
}

impl RawDocumentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            slot: row.get("slot")?,
            document_id: row.get("document_id")?,
            content: row.get("content")?,
            style_json: row.get("style_json")?,
            page_count: row.get("page_count")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_record(self) -> RepoResult<DocumentRecord> {
        let document_id: DocumentId = Uuid::parse_str(&self.document_id).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{}` in documents.document_id",
                self.document_id
            ))
        })?;
        let style: StyleState = serde_json::from_str(&self.style_json).map_err(|err| {
            RepoError::InvalidData(format!("invalid documents.style_json: {err}"))
        })?;
        let page_count = u32::try_from(self.page_count)
            .ok()
            .filter(|count| *count >= 1)
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid page_count value `{}` in documents.page_count",
                    self.page_count
                ))
            })?;

        Ok(DocumentRecord {
            slot: self.slot,
            document_id,
            content: self.content,
            style,
            page_count,
            updated_at: Some(self.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_slot, MAX_SLOT_CHARS};

    #[test]
    fn normalize_slot_trims_and_rejects_blank() {
        assert_eq!(normalize_slot("  draft "), Some("draft".to_string()));
        assert_eq!(normalize_slot("   "), None);
    }

    #[test]
    fn normalize_slot_rejects_overlong_names() {
        assert!(normalize_slot(&"s".repeat(MAX_SLOT_CHARS)).is_some());
        assert!(normalize_slot(&"s".repeat(MAX_SLOT_CHARS + 1)).is_none());
    }
}

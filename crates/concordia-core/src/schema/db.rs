use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{normalize_title, Document, DocumentDraft, DocumentId};

use super::migrations::MIGRATIONS;

/// The corpus store: a database connection with CRUD methods for
/// documents.
///
/// The store exclusively owns persisted document state. It assigns ids
/// and timestamps at write time and enforces normalized-title
/// uniqueness through a unique index.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Document CRUD
impl Database {
    /// Insert a new document; the store assigns the id and creation time.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTitle`] when another document already
    /// holds the same normalized title.
    pub fn insert(&self, draft: &DocumentDraft) -> Result<DocumentId> {
        let id = DocumentId::new();
        let embedding_json = if draft.embedding.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&draft.embedding)?)
        };

        let outcome = self.conn.execute(
            "INSERT INTO documents (
                id, title, title_normalized, body, embedding,
                source_image_ref, word_count, character_count, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                id.to_string(),
                draft.title,
                draft.normalized_title(),
                draft.body,
                embedding_json,
                draft.source_image_ref,
                draft.word_count(),
                draft.character_count(),
                Utc::now().to_rfc3339(),
            ],
        );

        match outcome {
            Ok(_) => {
                log::info!("Inserted document {id}: {}", truncate(&draft.title, 50));
                Ok(id)
            }
            Err(err) => Err(self.map_unique_violation(err, &draft.title)?),
        }
    }

    /// Update title, body and embedding together. Returns `false` when
    /// the id is unknown.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTitle`] when the new normalized title
    /// belongs to a different document.
    pub fn update(&self, id: &DocumentId, draft: &DocumentDraft) -> Result<bool> {
        let embedding_json = if draft.embedding.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&draft.embedding)?)
        };

        let outcome = self.conn.execute(
            "UPDATE documents SET
                title = ?2, title_normalized = ?3, body = ?4, embedding = ?5,
                word_count = ?6, character_count = ?7, updated_at = ?8
             WHERE id = ?1",
            rusqlite::params![
                id.to_string(),
                draft.title,
                draft.normalized_title(),
                draft.body,
                embedding_json,
                draft.word_count(),
                draft.character_count(),
                Utc::now().to_rfc3339(),
            ],
        );

        match outcome {
            Ok(rows) => Ok(rows > 0),
            Err(err) => Err(self.map_unique_violation(err, &draft.title)?),
        }
    }

    /// Delete a document by id. Returns `false` when the id is unknown.
    pub fn delete(&self, id: &DocumentId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?1", [id.to_string()])?;
        if rows > 0 {
            log::info!("Deleted document {id}");
        }
        Ok(rows > 0)
    }

    /// Find a document whose normalized title matches the given title
    /// (case-insensitive, whitespace-trimmed).
    pub fn find_by_normalized_title(&self, title: &str) -> Result<Option<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE title_normalized = ?1"
        ))?;

        let mut rows = stmt.query_map([normalize_title(title)], row_to_document)?;
        rows.next().transpose().map_err(Error::from)
    }

    /// Get a document by id.
    pub fn get_by_id(&self, id: &DocumentId) -> Result<Option<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
        ))?;

        let mut rows = stmt.query_map([id.to_string()], row_to_document)?;
        rows.next().transpose().map_err(Error::from)
    }

    /// All documents, newest first (id breaks creation-time ties).
    pub fn get_all(&self) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC, id ASC"
        ))?;

        let documents = stmt
            .query_map([], row_to_document)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(documents)
    }

    /// Number of documents in the corpus.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }

    /// Translate a UNIQUE-index violation on the normalized title into
    /// [`Error::DuplicateTitle`] naming the conflicting record; all other
    /// errors pass through unchanged.
    fn map_unique_violation(&self, err: rusqlite::Error, title: &str) -> Result<Error> {
        if let rusqlite::Error::SqliteFailure(failure, _) = &err {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                if let Some(existing) = self.find_by_normalized_title(title)? {
                    return Ok(Error::DuplicateTitle {
                        id: existing.id.to_string(),
                        title: existing.title,
                    });
                }
            }
        }
        Ok(Error::Database(err))
    }
}

const DOCUMENT_COLUMNS: &str = "id, title, body, embedding, source_image_ref, \
                                word_count, character_count, created_at, updated_at";

fn row_to_document(row: &rusqlite::Row) -> rusqlite::Result<Document> {
    let id_str: String = row.get(0)?;
    let embedding_json: Option<String> = row.get(3)?;
    let created_at_str: String = row.get(7)?;
    let updated_at_str: Option<String> = row.get(8)?;

    let id = DocumentId::from_str(&id_str)
        .map_err(|e| conversion_error(0, rusqlite::types::Type::Text, e))?;

    let embedding = embedding_json
        .map(|json| serde_json::from_str::<Vec<f32>>(&json))
        .transpose()
        .map_err(|e| conversion_error(3, rusqlite::types::Type::Text, e))?;

    let created_at = parse_timestamp(&created_at_str, 7)?;
    let updated_at = updated_at_str
        .map(|s| parse_timestamp(&s, 8))
        .transpose()?;

    Ok(Document {
        id,
        title: row.get(1)?,
        body: row.get(2)?,
        embedding,
        source_image_ref: row.get(4)?,
        word_count: row.get(5)?,
        character_count: row.get(6)?,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(value: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(Into::into)
        .map_err(|e| conversion_error(column, rusqlite::types::Type::Text, e))
}

fn conversion_error(
    column: usize,
    ty: rusqlite::types::Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(err))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, body: &str, embedding: Vec<f32>) -> DocumentDraft {
        DocumentDraft::new(title, body).unwrap().with_embedding(embedding)
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_document_round_trip() {
        let db = Database::open_in_memory().unwrap();

        let id = db
            .insert(&draft("Salmo 23", "O Senhor é o meu pastor", vec![0.5, -0.25]))
            .unwrap();

        let doc = db.get_by_id(&id).unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.title, "Salmo 23");
        assert_eq!(doc.body, "O Senhor é o meu pastor");
        assert_eq!(doc.embedding, Some(vec![0.5, -0.25]));
        assert_eq!(doc.word_count, 6);
        assert!(doc.updated_at.is_none());
    }

    #[test]
    fn test_duplicate_title_rejected_with_conflict_identity() {
        let db = Database::open_in_memory().unwrap();
        let first = db.insert(&draft("Salmo 23", "texto", vec![1.0])).unwrap();

        let err = db
            .insert(&draft("  SALMO 23  ", "outro texto", vec![2.0]))
            .unwrap_err();

        match err {
            Error::DuplicateTitle { id, title } => {
                assert_eq!(id, first.to_string());
                assert_eq!(title, "Salmo 23");
            }
            other => panic!("expected DuplicateTitle, got {other:?}"),
        }
    }

    #[test]
    fn test_find_by_normalized_title_folds_case() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert(&draft("Alegria", "corpo", vec![1.0])).unwrap();

        let found = db.find_by_normalized_title("  ALEGRIA ").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert!(db.find_by_normalized_title("tristeza").unwrap().is_none());
    }

    #[test]
    fn test_get_all_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let first = db.insert(&draft("Primeiro", "a", vec![1.0])).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = db.insert(&draft("Segundo", "b", vec![1.0])).unwrap();

        let all = db.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
    }

    #[test]
    fn test_update_replaces_fields_together() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert(&draft("Antes", "texto antigo", vec![1.0])).unwrap();

        let changed = db
            .update(&id, &draft("Depois", "texto novo", vec![2.0, 3.0]))
            .unwrap();
        assert!(changed);

        let doc = db.get_by_id(&id).unwrap().unwrap();
        assert_eq!(doc.title, "Depois");
        assert_eq!(doc.body, "texto novo");
        assert_eq!(doc.embedding, Some(vec![2.0, 3.0]));
        assert!(doc.updated_at.is_some());
    }

    #[test]
    fn test_update_unknown_id_returns_false() {
        let db = Database::open_in_memory().unwrap();
        let changed = db
            .update(&DocumentId::new(), &draft("T", "b", vec![1.0]))
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_update_to_taken_title_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let kept = db.insert(&draft("Ocupado", "a", vec![1.0])).unwrap();
        let edited = db.insert(&draft("Livre", "b", vec![1.0])).unwrap();

        let err = db
            .update(&edited, &draft("ocupado", "b2", vec![1.0]))
            .unwrap_err();
        match err {
            Error::DuplicateTitle { id, .. } => assert_eq!(id, kept.to_string()),
            other => panic!("expected DuplicateTitle, got {other:?}"),
        }
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert(&draft("Apagar", "x", vec![1.0])).unwrap();

        assert!(db.delete(&id).unwrap());
        assert!(!db.delete(&id).unwrap());
        assert!(db.get_by_id(&id).unwrap().is_none());
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_missing_embedding_stored_as_null() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .insert(&DocumentDraft::new("Sem vetor", "corpo").unwrap())
            .unwrap();

        let doc = db.get_by_id(&id).unwrap().unwrap();
        assert!(doc.embedding.is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concordia.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.insert(&draft("Persistente", "conteúdo", vec![0.1])).unwrap()
        };

        let db = Database::open(&path).unwrap();
        let doc = db.get_by_id(&id).unwrap().unwrap();
        assert_eq!(doc.title, "Persistente");
    }
}

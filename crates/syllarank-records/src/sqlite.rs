//! SQLite-backed normalized record store.
//!
//! Holds the canonical entities (texts, documents, citations, subfields,
//! fields, institutions) and the association rows linking documents to
//! subfields and institutions. The indexing core reads from this store
//! through the [`RecordStore`] trait during a rebuild.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use crate::semester::SemesterDate;
use crate::store::RecordStore;
use crate::types::*;
use syllarank_core::{Error, Result};

/// SQLite store for the normalized citation corpus.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteRecordStore {
    /// Open or create the record store.
    ///
    /// `db_dir` is the directory (e.g., `data/records/`). The file will be
    /// `db_dir/syllarank.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("syllarank.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let text_count = store.count_texts()?;
        let citation_count = store.count_citations()?;
        info!(
            "SqliteRecordStore initialized: {} texts, {} citations, path={}",
            text_count,
            citation_count,
            store.db_path.display()
        );

        Ok(store)
    }

    /// Open the store under the configured records directory.
    pub fn from_config(config: &syllarank_core::EngineConfig) -> Result<Self> {
        Self::open(&config.data_paths.records)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Texts
    // ---------------------------------------------------------------

    /// Insert a text. Returns the new text ID.
    pub fn add_text(
        &self,
        corpus: &str,
        title: Option<&str>,
        author: Option<&str>,
    ) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO texts (corpus, title, author) VALUES (?1, ?2, ?3)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![corpus, title, author])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Get a text by ID.
    pub fn get_text(&self, text_id: i64) -> Result<Option<Text>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM texts WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![text_id], |row| Ok(Self::row_to_text(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Write cached citation counts back onto text rows.
    ///
    /// `counts` is keyed by the canonical string form of the text id, as
    /// produced by the ranking aggregator. Returns the number of rows
    /// updated.
    pub fn write_citation_counts(&self, counts: &HashMap<String, u64>) -> Result<usize> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("UPDATE texts SET citation_count = ?1 WHERE id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut updated = 0;
        for (text_id, count) in counts {
            let id: i64 = text_id
                .parse()
                .map_err(|_| Error::Internal(format!("Bad text id key: {}", text_id)))?;
            updated += stmt
                .execute(params![*count as i64, id])
                .map_err(|e| Error::Database(e.to_string()))?;
        }
        Ok(updated)
    }

    /// Count total texts.
    pub fn count_texts(&self) -> Result<i64> {
        self.count_rows("texts")
    }

    // ---------------------------------------------------------------
    // Documents and citations
    // ---------------------------------------------------------------

    /// Insert a document. Returns the new document ID.
    pub fn add_document(&self, source: Option<&str>) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO documents (source) VALUES (?1)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![source])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Get a document by ID.
    pub fn get_document(&self, document_id: i64) -> Result<Option<Document>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM documents WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![document_id], |row| Ok(Self::row_to_document(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Record a citation fact. Returns the new citation ID.
    pub fn add_citation(&self, document_id: i64, text_id: i64) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO citations (document_id, text_id) VALUES (?1, ?2)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![document_id, text_id])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Count total citations.
    pub fn count_citations(&self) -> Result<i64> {
        self.count_rows("citations")
    }

    /// Count total documents.
    pub fn count_documents(&self) -> Result<i64> {
        self.count_rows("documents")
    }

    // ---------------------------------------------------------------
    // Classification
    // ---------------------------------------------------------------

    /// Insert a field. Returns the new field ID.
    pub fn add_field(&self, name: &str) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO fields (name) VALUES (?1)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![name])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Insert a subfield under a field. Returns the new subfield ID.
    pub fn add_subfield(&self, field_id: i64, name: &str) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO subfields (field_id, name) VALUES (?1, ?2)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![field_id, name])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Associate a document with a subfield.
    pub fn link_subfield(&self, document_id: i64, subfield_id: i64) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO document_subfields (document_id, subfield_id) VALUES (?1, ?2)",
            params![document_id, subfield_id],
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Institutions
    // ---------------------------------------------------------------

    /// Insert an institution. Returns the new institution ID.
    pub fn add_institution(&self, inst: &NewInstitution) -> Result<i64> {
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO institutions (name, domain, state, country) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![inst.name, inst.domain, inst.state, inst.country])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Get an institution by ID.
    pub fn get_institution(&self, institution_id: i64) -> Result<Option<Institution>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM institutions WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![institution_id], |row| {
                Ok(Self::row_to_institution(row))
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Get all institutions.
    pub fn all_institutions(&self) -> Result<Vec<Institution>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM institutions ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_institution(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Associate a document with an institution.
    pub fn link_institution(&self, document_id: i64, institution_id: i64) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO document_institutions (document_id, institution_id) \
             VALUES (?1, ?2)",
            params![document_id, institution_id],
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Count total institutions.
    pub fn count_institutions(&self) -> Result<i64> {
        self.count_rows("institutions")
    }

    // ---------------------------------------------------------------
    // Semester dates
    // ---------------------------------------------------------------

    /// Record the raw semester/year strings captured for a document.
    pub fn add_semester_date(&self, date: &SemesterDate) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO document_dates (document_id, semester, year, offset_val) \
             VALUES (?1, ?2, ?3, ?4)",
            params![date.document_id, date.semester, date.year, date.offset],
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the semester date captured for a document, if any.
    pub fn semester_date(&self, document_id: i64) -> Result<Option<SemesterDate>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM document_dates WHERE document_id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![document_id], |row| {
                Ok(SemesterDate {
                    document_id: row.get("document_id").unwrap_or(0),
                    semester: row.get("semester").unwrap_or_default(),
                    year: row.get("year").unwrap_or_default(),
                    offset: row.get("offset_val").unwrap_or(0),
                })
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    /// Corpus-level statistics.
    pub fn stats(&self) -> Result<RecordStats> {
        Ok(RecordStats {
            total_texts: self.count_texts()?,
            total_documents: self.count_documents()?,
            total_citations: self.count_citations()?,
            total_institutions: self.count_institutions()?,
            db_path: self.db_path.to_string_lossy().to_string(),
        })
    }

    fn count_rows(&self, table: &str) -> Result<i64> {
        let conn = self.conn.lock();
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Row mappers
    // ---------------------------------------------------------------

    fn row_to_text(row: &rusqlite::Row<'_>) -> Text {
        Text {
            id: row.get("id").unwrap_or(0),
            corpus: row.get("corpus").unwrap_or_default(),
            title: row.get("title").ok().flatten(),
            author: row.get("author").ok().flatten(),
            citation_count: row.get("citation_count").ok().flatten(),
        }
    }

    fn row_to_document(row: &rusqlite::Row<'_>) -> Document {
        Document {
            id: row.get("id").unwrap_or(0),
            source: row.get("source").ok().flatten(),
        }
    }

    fn row_to_citation(row: &rusqlite::Row<'_>) -> Citation {
        Citation {
            id: row.get("id").unwrap_or(0),
            document_id: row.get("document_id").unwrap_or(0),
            text_id: row.get("text_id").unwrap_or(0),
        }
    }

    fn row_to_subfield(row: &rusqlite::Row<'_>) -> Subfield {
        Subfield {
            id: row.get("id").unwrap_or(0),
            field_id: row.get("field_id").unwrap_or(0),
            name: row.get("name").unwrap_or_default(),
        }
    }

    fn row_to_institution(row: &rusqlite::Row<'_>) -> Institution {
        Institution {
            id: row.get("id").unwrap_or(0),
            name: row.get("name").unwrap_or_default(),
            domain: row.get("domain").ok().flatten(),
            state: row.get("state").ok().flatten(),
            country: row.get("country").ok().flatten(),
        }
    }
}

impl RecordStore for SqliteRecordStore {
    fn citations(&self) -> Result<Vec<Citation>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM citations ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_citation(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn text(&self, id: i64) -> Result<Option<Text>> {
        self.get_text(id)
    }

    fn document(&self, id: i64) -> Result<Option<Document>> {
        self.get_document(id)
    }

    fn document_subfields(&self, document_id: i64) -> Result<Vec<Subfield>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT s.* FROM subfields s \
                 JOIN document_subfields ds ON ds.subfield_id = s.id \
                 WHERE ds.document_id = ?1 ORDER BY s.id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![document_id], |row| Ok(Self::row_to_subfield(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn document_institutions(&self, document_id: i64) -> Result<Vec<Institution>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT i.* FROM institutions i \
                 JOIN document_institutions di ON di.institution_id = i.id \
                 WHERE di.document_id = ?1 ORDER BY i.id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![document_id], |row| {
                Ok(Self::row_to_institution(row))
            })
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

//! Database schema SQL for the normalized record store.

/// Core tables: texts, documents, citations, classification and
/// institution tables plus their association tables.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS texts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    corpus TEXT NOT NULL,
    title TEXT,
    author TEXT,
    citation_count INTEGER
);

CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT
);

CREATE TABLE IF NOT EXISTS citations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    text_id INTEGER NOT NULL REFERENCES texts(id)
);

CREATE INDEX IF NOT EXISTS idx_citations_document ON citations(document_id);
CREATE INDEX IF NOT EXISTS idx_citations_text ON citations(text_id);

CREATE TABLE IF NOT EXISTS fields (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subfields (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    field_id INTEGER NOT NULL REFERENCES fields(id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS institutions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    domain TEXT,
    state TEXT,
    country TEXT
);

CREATE TABLE IF NOT EXISTS document_subfields (
    document_id INTEGER NOT NULL REFERENCES documents(id),
    subfield_id INTEGER NOT NULL REFERENCES subfields(id),
    PRIMARY KEY (document_id, subfield_id)
);

CREATE TABLE IF NOT EXISTS document_institutions (
    document_id INTEGER NOT NULL REFERENCES documents(id),
    institution_id INTEGER NOT NULL REFERENCES institutions(id),
    PRIMARY KEY (document_id, institution_id)
);

CREATE TABLE IF NOT EXISTS document_dates (
    document_id INTEGER NOT NULL UNIQUE REFERENCES documents(id),
    semester TEXT NOT NULL,
    year TEXT NOT NULL,
    offset_val INTEGER NOT NULL
);
"#;

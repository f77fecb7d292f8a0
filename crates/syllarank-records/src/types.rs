//! Row types for the normalized record store.

use serde::{Deserialize, Serialize};

/// A citable work. Many documents may cite the same text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: i64,
    /// Corpus classification label (e.g., which bibliographic source
    /// the text was drawn from).
    pub corpus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Cached citation count, written back after ranking runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<i64>,
}

/// A syllabus or reading-list entry that performs citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The fact "document D cites text T".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub id: i64,
    pub document_id: i64,
    pub text_id: i64,
}

/// A top-level academic discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: i64,
    pub name: String,
}

/// A sub-discipline. Belongs to exactly one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subfield {
    pub id: i64,
    pub field_id: i64,
    pub name: String,
}

/// A university or college.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Fields accepted when inserting an institution.
#[derive(Debug, Clone, Default)]
pub struct NewInstitution {
    pub name: String,
    pub domain: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStats {
    pub total_texts: i64,
    pub total_documents: i64,
    pub total_citations: i64,
    pub total_institutions: i64,
    pub db_path: String,
}

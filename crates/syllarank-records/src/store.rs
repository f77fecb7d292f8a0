//! Read interface the indexing core consumes.

use syllarank_core::Result;

use crate::types::{Citation, Document, Institution, Subfield, Text};

/// Read-only view of the normalized record store, as consumed during an
/// index rebuild. The indexing core never writes through this trait.
pub trait RecordStore: Send + Sync {
    /// All citation facts currently in the store.
    fn citations(&self) -> Result<Vec<Citation>>;

    /// Resolve a text by id. `None` if the reference has drifted.
    fn text(&self, id: i64) -> Result<Option<Text>>;

    /// Resolve a document by id. `None` if the reference has drifted.
    fn document(&self, id: i64) -> Result<Option<Document>>;

    /// Subfields associated with a document, each carrying its parent
    /// field id.
    fn document_subfields(&self, document_id: i64) -> Result<Vec<Subfield>>;

    /// Institutions associated with a document.
    fn document_institutions(&self, document_id: i64) -> Result<Vec<Institution>>;
}

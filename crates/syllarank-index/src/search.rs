//! Search index adapter — the document store the ranking engine queries.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::doc::IndexDoc;
use crate::query::IndexQuery;
use syllarank_core::Result;

/// A document store supporting keyword filtering and grouped count
/// aggregation over index documents.
pub trait SearchIndex: Send + Sync {
    /// Atomically replace the full contents of the index with a new
    /// generation of documents. All-or-nothing: queries observe either
    /// the previous generation or the new one, never a mix.
    fn replace_all(&self, docs: Vec<IndexDoc>) -> Result<()>;

    /// Count matching documents grouped by text id. Keys are the
    /// canonical string form of the text id; texts with zero matches are
    /// omitted.
    fn count_by_text(&self, query: &IndexQuery) -> Result<HashMap<String, u64>>;

    /// Number of documents in the current generation.
    fn doc_count(&self) -> Result<usize>;
}

/// In-process search index. One generation of documents lives behind an
/// `Arc`; a rebuild swaps the pointer, so readers holding the old
/// generation finish against a consistent snapshot.
#[derive(Default)]
pub struct MemoryIndex {
    generation: Mutex<Arc<Vec<IndexDoc>>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current generation.
    fn snapshot(&self) -> Arc<Vec<IndexDoc>> {
        Arc::clone(&self.generation.lock())
    }
}

impl SearchIndex for MemoryIndex {
    fn replace_all(&self, docs: Vec<IndexDoc>) -> Result<()> {
        let next = Arc::new(docs);
        let mut generation = self.generation.lock();
        debug!(
            "Index generation swap: {} -> {} documents",
            generation.len(),
            next.len()
        );
        *generation = next;
        Ok(())
    }

    fn count_by_text(&self, query: &IndexQuery) -> Result<HashMap<String, u64>> {
        let docs = self.snapshot();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc in docs.iter().filter(|d| query.matches(d)) {
            *counts.entry(doc.text_id.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn doc_count(&self) -> Result<usize> {
        Ok(self.snapshot().len())
    }
}

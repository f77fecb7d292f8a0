//! Per-text citation count caching.

use tracing::info;

use syllarank_core::Result;
use syllarank_index::{compute_ranking, SearchIndex};
use syllarank_records::SqliteRecordStore;

/// Compute the unfiltered ranking and cache each count onto its text row.
///
/// Texts with no citations keep a NULL cached count. Returns the number
/// of texts updated.
pub fn cache_citation_counts(
    store: &SqliteRecordStore,
    index: &dyn SearchIndex,
) -> Result<usize> {
    let counts = compute_ranking(index, &[])?;
    let updated = store.write_citation_counts(&counts)?;
    info!("Cached citation counts for {} texts", updated);
    Ok(updated)
}

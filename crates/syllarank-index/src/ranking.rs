//! Ranking aggregation — text id to citation count under a filter set.

use std::collections::HashMap;

use tracing::debug;

use crate::query::{Filter, IndexQuery};
use crate::search::SearchIndex;
use syllarank_core::Result;

/// Rank texts by citation count under the given filters.
///
/// Returns a mapping from the canonical string form of the text id to the
/// number of matching citations. Texts with zero matching citations are
/// omitted rather than reported as zero. The mapping carries no iteration
/// order; sorting is the caller's concern.
///
/// A failure to query the index surfaces as
/// [`syllarank_core::Error::IndexUnavailable`] — never as an empty
/// mapping.
pub fn compute_ranking(
    index: &dyn SearchIndex,
    filters: &[Filter],
) -> Result<HashMap<String, u64>> {
    let query = IndexQuery::translate(filters);
    let ranks = index.count_by_text(&query)?;
    debug!(
        "Ranking computed: {} clauses, {} texts",
        query.len(),
        ranks.len()
    );
    Ok(ranks)
}

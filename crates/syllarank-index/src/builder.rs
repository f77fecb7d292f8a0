//! Index document builder — projects citation facts into the search index.

use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::doc::IndexDoc;
use crate::search::SearchIndex;
use syllarank_core::Result;
use syllarank_records::RecordStore;

/// Result of a full index rebuild.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RebuildReport {
    /// Index documents published.
    pub indexed: usize,
    /// Citations skipped because their document or text no longer
    /// resolves.
    pub skipped: usize,
    pub duration_ms: u64,
}

/// Builds one index document per citation and publishes the batch.
pub struct IndexBuilder;

impl IndexBuilder {
    /// Rebuild the search index from the current record store contents.
    ///
    /// The whole batch is projected first and published with a single
    /// atomic replace; a failed publish leaves the previous index
    /// generation untouched. Citations with drifted references are
    /// skipped and counted, never fatal.
    pub fn rebuild(store: &dyn RecordStore, index: &dyn SearchIndex) -> Result<RebuildReport> {
        let start = Instant::now();
        let citations = store.citations()?;

        info!("Index rebuild starting: {} citations", citations.len());

        let mut docs = Vec::with_capacity(citations.len());
        let mut skipped = 0;

        for citation in &citations {
            let text = match store.text(citation.text_id)? {
                Some(t) => t,
                None => {
                    warn!(
                        "Skipping citation {}: text {} does not resolve",
                        citation.id, citation.text_id
                    );
                    skipped += 1;
                    continue;
                }
            };
            let document = match store.document(citation.document_id)? {
                Some(d) => d,
                None => {
                    warn!(
                        "Skipping citation {}: document {} does not resolve",
                        citation.id, citation.document_id
                    );
                    skipped += 1;
                    continue;
                }
            };

            docs.push(Self::project(store, &text, document.id)?);
        }

        let indexed = docs.len();
        index.replace_all(docs)?;

        let report = RebuildReport {
            indexed,
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Index rebuild complete: indexed={}, skipped={}, duration={}ms",
            report.indexed, report.skipped, report.duration_ms
        );

        Ok(report)
    }

    /// Project one citation into its denormalized index document.
    fn project(
        store: &dyn RecordStore,
        text: &syllarank_records::Text,
        document_id: i64,
    ) -> Result<IndexDoc> {
        let subfields = store.document_subfields(document_id)?;
        let institutions = store.document_institutions(document_id)?;

        // Field ids are derived from the subfields; two subfields under
        // the same field contribute it once.
        let field_ids: BTreeSet<i64> = subfields.iter().map(|sf| sf.field_id).collect();
        let states: BTreeSet<String> = institutions
            .iter()
            .filter_map(|i| i.state.clone())
            .collect();
        let countries: BTreeSet<String> = institutions
            .iter()
            .filter_map(|i| i.country.clone())
            .collect();

        Ok(IndexDoc {
            text_id: text.id,
            corpus: text.corpus.clone(),
            subfield_ids: subfields.iter().map(|sf| sf.id).collect(),
            field_ids: field_ids.into_iter().collect(),
            institution_ids: institutions.iter().map(|i| i.id).collect(),
            states: states.into_iter().collect(),
            countries: countries.into_iter().collect(),
        })
    }
}

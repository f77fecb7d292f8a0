//! Syllarank Ingest — ETL glue around the record store: institution
//! directory loading and per-text citation count caching.

pub mod institutions;
pub mod stats;

pub use institutions::{ingest_usa, IngestReport};
pub use stats::cache_citation_counts;

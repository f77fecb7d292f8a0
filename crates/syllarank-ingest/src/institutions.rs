//! US institution directory ingestion.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use syllarank_core::{Error, Result};
use syllarank_records::{NewInstitution, SqliteRecordStore};

/// Result of an institution directory load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Rows inserted into the record store.
    pub inserted: usize,
    /// Rows skipped (non-USA institutions).
    pub skipped: usize,
}

/// One row of the directory CSV.
#[derive(Debug, Deserialize)]
struct DirectoryRow {
    name: String,
    domain: String,
    state: String,
    country: String,
}

/// Load a US institution directory CSV into the record store.
///
/// Rows whose country is not `USA` are skipped. Every field is
/// whitespace-trimmed, and the country is stored as `US`.
pub fn ingest_usa(store: &SqliteRecordStore, csv_path: impl AsRef<Path>) -> Result<IngestReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path.as_ref())
        .map_err(|e| Error::Ingest(e.to_string()))?;

    let mut report = IngestReport::default();
    for row in reader.deserialize::<DirectoryRow>() {
        let row = row.map_err(|e| Error::Ingest(e.to_string()))?;

        if row.country.trim() != "USA" {
            report.skipped += 1;
            continue;
        }

        store.add_institution(&NewInstitution {
            name: row.name.trim().to_string(),
            domain: Some(row.domain.trim().to_string()),
            state: Some(row.state.trim().to_string()),
            country: Some("US".into()),
        })?;
        report.inserted += 1;
    }

    info!(
        "Institution ingest complete: inserted={}, skipped={}",
        report.inserted, report.skipped
    );

    Ok(report)
}

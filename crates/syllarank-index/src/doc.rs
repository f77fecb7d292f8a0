//! The denormalized, per-citation index document.

use serde::{Deserialize, Serialize};

/// One record per citation, carrying every facet value reachable from
/// that citation. Derived and disposable; rebuilt wholesale on every
/// re-index, never patched field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDoc {
    /// The cited text.
    pub text_id: i64,
    /// The cited text's corpus label.
    pub corpus: String,
    /// Subfields of the citing document.
    pub subfield_ids: Vec<i64>,
    /// Parent fields of those subfields, deduplicated.
    pub field_ids: Vec<i64>,
    /// Institutions linked to the citing document.
    pub institution_ids: Vec<i64>,
    /// States of those institutions.
    pub states: Vec<String>,
    /// Countries of those institutions.
    pub countries: Vec<String>,
}

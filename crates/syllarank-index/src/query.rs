//! Filter translation — from facet filter requests to index queries.
//!
//! Facets combine with AND; the values listed inside one facet combine
//! with OR. A facet with no values constrains nothing and is dropped
//! before the query reaches the index.

use serde_json::Value;

use crate::doc::IndexDoc;
use syllarank_core::{Error, Result};

/// One facet constraint. Multiple values mean "any of these".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Keyword match on the text's corpus label.
    Corpus(Vec<String>),
    /// Membership in the citing document's subfields.
    Subfield(Vec<i64>),
    /// Membership in the parent fields of those subfields.
    Field(Vec<i64>),
    /// Membership in the citing document's institutions.
    Institution(Vec<i64>),
    /// Keyword match on those institutions' states.
    State(Vec<String>),
    /// Keyword match on those institutions' countries.
    Country(Vec<String>),
}

impl Filter {
    /// Whether this facet lists no values and therefore constrains nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::Corpus(v) | Filter::State(v) | Filter::Country(v) => v.is_empty(),
            Filter::Subfield(v) | Filter::Field(v) | Filter::Institution(v) => v.is_empty(),
        }
    }

    /// Whether an index document satisfies this facet (any listed value).
    fn matches(&self, doc: &IndexDoc) -> bool {
        match self {
            Filter::Corpus(values) => values.iter().any(|v| *v == doc.corpus),
            Filter::Subfield(ids) => ids.iter().any(|id| doc.subfield_ids.contains(id)),
            Filter::Field(ids) => ids.iter().any(|id| doc.field_ids.contains(id)),
            Filter::Institution(ids) => ids.iter().any(|id| doc.institution_ids.contains(id)),
            Filter::State(values) => values.iter().any(|v| doc.states.contains(v)),
            Filter::Country(values) => values.iter().any(|v| doc.countries.contains(v)),
        }
    }
}

/// A boolean query over index documents: the conjunction of the non-empty
/// facet constraints. No clauses means match-all.
#[derive(Debug, Clone, Default)]
pub struct IndexQuery {
    clauses: Vec<Filter>,
}

impl IndexQuery {
    /// A query matching every index document.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Translate a filter list into a query, dropping empty facets.
    pub fn translate(filters: &[Filter]) -> Self {
        let clauses = filters
            .iter()
            .filter(|f| !f.is_empty())
            .cloned()
            .collect();
        Self { clauses }
    }

    /// Whether an index document satisfies every clause.
    pub fn matches(&self, doc: &IndexDoc) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }

    /// Number of active clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Parse a loose JSON filter request into typed filters.
///
/// The request is an object mapping facet keys (`corpus`, `subfield_id`,
/// `field_id`, `institution_id`, `state`, `country`) to a scalar, a list,
/// or `null`. `null` and empty-list facets are dropped. Unrecognized keys
/// and wrong-shaped values are rejected with [`Error::InvalidFilter`]
/// before any query executes.
pub fn filters_from_json(request: &Value) -> Result<Vec<Filter>> {
    let map = match request {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(Error::InvalidFilter(format!(
                "Expected an object of facets, got: {}",
                other
            )))
        }
    };

    let mut filters = Vec::new();
    for (key, value) in map {
        let filter = match key.as_str() {
            "corpus" => Filter::Corpus(keyword_values(key, value)?),
            "subfield_id" => Filter::Subfield(id_values(key, value)?),
            "field_id" => Filter::Field(id_values(key, value)?),
            "institution_id" => Filter::Institution(id_values(key, value)?),
            "state" => Filter::State(keyword_values(key, value)?),
            "country" => Filter::Country(keyword_values(key, value)?),
            other => {
                return Err(Error::InvalidFilter(format!("Unrecognized facet: {}", other)))
            }
        };
        if !filter.is_empty() {
            filters.push(filter);
        }
    }
    Ok(filters)
}

/// Normalize a scalar-or-list value into a list of string keywords.
fn keyword_values(key: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items.iter().map(|v| keyword_value(key, v)).collect(),
        other => Err(bad_shape(key, other)),
    }
}

fn keyword_value(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(bad_shape(key, other)),
    }
}

/// Normalize a scalar-or-list value into a list of integer ids.
fn id_values(key: &str, value: &Value) -> Result<Vec<i64>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Number(_) => Ok(vec![id_value(key, value)?]),
        Value::Array(items) => items.iter().map(|v| id_value(key, v)).collect(),
        other => Err(bad_shape(key, other)),
    }
}

fn id_value(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| bad_shape(key, value))
}

fn bad_shape(key: &str, value: &Value) -> Error {
    Error::InvalidFilter(format!("Bad value for facet {}: {}", key, value))
}

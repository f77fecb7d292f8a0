//! End-to-end ranking tests: record store -> rebuild -> filtered counts.

use std::collections::HashMap;

use serde_json::{json, Value};

use syllarank_index::{compute_ranking, filters_from_json, IndexBuilder, MemoryIndex};
use syllarank_records::{NewInstitution, SqliteRecordStore};

struct Fixture {
    store: SqliteRecordStore,
    index: MemoryIndex,
    _dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteRecordStore::open(dir.path()).unwrap();
        Self {
            store,
            index: MemoryIndex::new(),
            _dir: dir,
        }
    }

    fn add_text(&self, corpus: &str) -> i64 {
        self.store.add_text(corpus, None, None).unwrap()
    }

    /// Add a citation on a fresh document. Returns the document id.
    fn add_citation(&self, text_id: i64) -> i64 {
        let document_id = self.store.add_document(None).unwrap();
        self.store.add_citation(document_id, text_id).unwrap();
        document_id
    }

    fn add_institution(&self, name: &str, state: &str, country: &str) -> i64 {
        self.store
            .add_institution(&NewInstitution {
                name: name.into(),
                domain: None,
                state: Some(state.into()),
                country: Some(country.into()),
            })
            .unwrap()
    }

    fn rebuild(&self) {
        IndexBuilder::rebuild(&self.store, &self.index).unwrap();
    }

    fn ranking(&self, filters: Value) -> HashMap<String, u64> {
        let filters = filters_from_json(&filters).unwrap();
        compute_ranking(&self.index, &filters).unwrap()
    }
}

fn ranks(pairs: &[(i64, u64)]) -> HashMap<String, u64> {
    pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
}

#[test]
fn unfiltered_returns_total_counts() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    for _ in 0..3 {
        fx.add_citation(t1);
    }
    for _ in 0..2 {
        fx.add_citation(t2);
    }
    fx.add_citation(t3);

    fx.rebuild();

    assert_eq!(fx.ranking(json!({})), ranks(&[(t1, 3), (t2, 2), (t3, 1)]));
}

#[test]
fn filter_corpus_keyword() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus2");

    for _ in 0..3 {
        fx.add_citation(t1);
    }
    for _ in 0..2 {
        fx.add_citation(t2);
    }
    fx.add_citation(t3);

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "corpus": "corpus1" })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn filter_subfield() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    let f = fx.store.add_field("field").unwrap();
    let sf1 = fx.store.add_subfield(f, "subfield1").unwrap();
    let sf2 = fx.store.add_subfield(f, "subfield2").unwrap();

    for _ in 0..3 {
        let d = fx.add_citation(t1);
        fx.store.link_subfield(d, sf1).unwrap();
    }
    for _ in 0..2 {
        let d = fx.add_citation(t2);
        fx.store.link_subfield(d, sf1).unwrap();
    }
    let d = fx.add_citation(t3);
    fx.store.link_subfield(d, sf2).unwrap();

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "subfield_id": sf1 })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn filter_field_via_parent() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    let f1 = fx.store.add_field("field1").unwrap();
    let f2 = fx.store.add_field("field2").unwrap();
    let sf1 = fx.store.add_subfield(f1, "subfield1").unwrap();
    let sf2 = fx.store.add_subfield(f2, "subfield2").unwrap();

    for _ in 0..3 {
        let d = fx.add_citation(t1);
        fx.store.link_subfield(d, sf1).unwrap();
    }
    for _ in 0..2 {
        let d = fx.add_citation(t2);
        fx.store.link_subfield(d, sf1).unwrap();
    }
    let d = fx.add_citation(t3);
    fx.store.link_subfield(d, sf2).unwrap();

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "field_id": f1 })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn field_filter_covers_its_subfields() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");

    let f = fx.store.add_field("field").unwrap();
    let sf1 = fx.store.add_subfield(f, "subfield1").unwrap();
    let sf2 = fx.store.add_subfield(f, "subfield2").unwrap();

    let d = fx.add_citation(t1);
    fx.store.link_subfield(d, sf1).unwrap();
    let d = fx.add_citation(t2);
    fx.store.link_subfield(d, sf2).unwrap();

    fx.rebuild();

    // Filtering on the field returns the union of its subfields' counts.
    let by_field = fx.ranking(json!({ "field_id": f }));
    let by_sf1 = fx.ranking(json!({ "subfield_id": sf1 }));
    let by_sf2 = fx.ranking(json!({ "subfield_id": sf2 }));

    for (text_id, count) in by_sf1.iter().chain(by_sf2.iter()) {
        assert!(by_field.get(text_id).copied().unwrap_or(0) >= *count);
    }
    assert_eq!(by_field, ranks(&[(t1, 1), (t2, 1)]));
}

#[test]
fn filter_institution() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    let i1 = fx.add_institution("inst1", "AL", "US");
    let i2 = fx.add_institution("inst2", "CA", "US");

    for _ in 0..3 {
        let d = fx.add_citation(t1);
        fx.store.link_institution(d, i1).unwrap();
    }
    for _ in 0..2 {
        let d = fx.add_citation(t2);
        fx.store.link_institution(d, i1).unwrap();
    }
    let d = fx.add_citation(t3);
    fx.store.link_institution(d, i2).unwrap();

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "institution_id": i1 })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn filter_state_keyword() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    let i1 = fx.add_institution("inst1", "AL", "US");
    let i2 = fx.add_institution("inst2", "CA", "US");

    for _ in 0..3 {
        let d = fx.add_citation(t1);
        fx.store.link_institution(d, i1).unwrap();
    }
    for _ in 0..2 {
        let d = fx.add_citation(t2);
        fx.store.link_institution(d, i1).unwrap();
    }
    let d = fx.add_citation(t3);
    fx.store.link_institution(d, i2).unwrap();

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "state": "AL" })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn filter_country_keyword() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus1");
    let t3 = fx.add_text("corpus1");

    let i1 = fx.add_institution("inst1", "AL", "US");
    let i2 = fx.add_institution("inst2", "ON", "CA");

    for _ in 0..3 {
        let d = fx.add_citation(t1);
        fx.store.link_institution(d, i1).unwrap();
    }
    for _ in 0..2 {
        let d = fx.add_citation(t2);
        fx.store.link_institution(d, i1).unwrap();
    }
    let d = fx.add_citation(t3);
    fx.store.link_institution(d, i2).unwrap();

    fx.rebuild();

    assert_eq!(
        fx.ranking(json!({ "country": "US" })),
        ranks(&[(t1, 3), (t2, 2)])
    );
}

#[test]
fn multiple_values_match_any() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus2");
    let t3 = fx.add_text("corpus3");

    for _ in 0..3 {
        fx.add_citation(t1);
    }
    for _ in 0..2 {
        fx.add_citation(t2);
    }
    fx.add_citation(t3);

    fx.rebuild();

    // Count both corpus1 and corpus3 citations; corpus2 is excluded.
    assert_eq!(
        fx.ranking(json!({ "corpus": ["corpus1", "corpus3"] })),
        ranks(&[(t1, 3), (t3, 1)])
    );
}

#[test]
fn empty_filter_values_are_ignored() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus2");
    let t3 = fx.add_text("corpus3");

    for _ in 0..3 {
        fx.add_citation(t1);
    }
    for _ in 0..2 {
        fx.add_citation(t2);
    }
    fx.add_citation(t3);

    fx.rebuild();

    let expected = ranks(&[(t1, 3), (t2, 2), (t3, 1)]);
    for empty in [json!({ "corpus": null }), json!({ "corpus": [] })] {
        assert_eq!(fx.ranking(empty), expected);
    }
}

#[test]
fn rebuild_is_idempotent() {
    let fx = Fixture::new();

    let t1 = fx.add_text("corpus1");
    let t2 = fx.add_text("corpus2");
    fx.add_citation(t1);
    fx.add_citation(t1);
    fx.add_citation(t2);

    let i1 = fx.add_institution("inst1", "AL", "US");
    let d = fx.add_citation(t1);
    fx.store.link_institution(d, i1).unwrap();

    fx.rebuild();
    let first_total = fx.ranking(json!({}));
    let first_state = fx.ranking(json!({ "state": "AL" }));

    fx.rebuild();
    assert_eq!(fx.ranking(json!({})), first_total);
    assert_eq!(fx.ranking(json!({ "state": "AL" })), first_state);
}

//! Syllarank Records — the normalized record store: texts, documents,
//! citations, subfields/fields, institutions, and their associations.

pub mod schema;
pub mod semester;
pub mod sqlite;
pub mod store;
pub mod types;

pub use semester::SemesterDate;
pub use sqlite::SqliteRecordStore;
pub use store::RecordStore;
pub use types::*;

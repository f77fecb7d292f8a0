//! Syllarank Index — citation ranking and indexing engine.
//!
//! Projects normalized citation facts into denormalized index documents,
//! and answers "rank these texts by citation count, under this combination
//! of filters" queries against them.

pub mod builder;
pub mod doc;
pub mod query;
pub mod ranking;
pub mod search;

pub use builder::{IndexBuilder, RebuildReport};
pub use doc::IndexDoc;
pub use query::{filters_from_json, Filter, IndexQuery};
pub use ranking::compute_ranking;
pub use search::{MemoryIndex, SearchIndex};

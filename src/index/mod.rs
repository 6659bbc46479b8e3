//! The generated documentation search index: model, codec, integrity checks,
//! and a parsed-index cache.

pub mod cache;
pub mod codec;
pub mod model;
pub mod validate;

pub use cache::IndexCache;
pub use codec::{load_index, parse_index, to_pretty_json, to_script};
pub use model::{
    DocIndex, IndexEntry, ObjName, ObjectEntry, ObjectRef, Postings, SearchIndex, TitleRef,
};
pub use validate::{IndexViolation, ValidationReport, validate};

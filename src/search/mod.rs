//! Ranked search over a loaded documentation index.
//!
//! This module covers query tokenization, score weights, and query resolution
//! across objects, titles, index entries, and full-text terms.

// Module declarations
pub mod hit;
pub mod query;
pub mod scoring;
pub mod tokenize;

// Public re-exports (used via lib.rs)
pub use hit::{HitKind, SearchHit, Suggestion};
pub use query::QueryEngine;
pub use scoring::{Scorer, relative_relevance};
pub use tokenize::{Query, QueryWord, parse_query};

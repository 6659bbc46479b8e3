//! tidystring: shape-preserving string utilities plus tooling for the
//! generated documentation site (search index and navigation expansion).

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod nav;
pub mod search;
pub mod strings;
pub mod tracing;

pub use config::Config;
pub use error::{LoadError, Result, TidyError};
pub use index::{SearchIndex, ValidationReport, load_index, validate};
pub use nav::{Document, NavExpander};
pub use search::{QueryEngine, SearchHit};

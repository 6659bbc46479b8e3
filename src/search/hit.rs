//! Search results.

use crate::index::DocIndex;
use serde::Serialize;
use std::fmt;

/// Which part of the index produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    /// A documented object (function, class, ...).
    Object,
    /// A section or page title.
    Title,
    /// A general index entry.
    Index,
    /// Full-text match on a page.
    Text,
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Object => "object",
            Self::Title => "title",
            Self::Index => "index",
            Self::Text => "text",
        })
    }
}

/// A ranked search result pointing into a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc: DocIndex,
    pub docname: String,
    pub filename: String,
    /// Title of the containing page.
    pub title: String,
    pub anchor: Option<String>,
    /// What matched: object full name, heading, index entry, or page title.
    pub label: String,
    /// Object type label (e.g. "Python function"), for object hits.
    pub description: Option<String>,
    pub kind: HitKind,
    pub score: i32,
}

impl SearchHit {
    /// Link relative to the site root.
    pub fn href(&self) -> String {
        match &self.anchor {
            Some(anchor) if !anchor.is_empty() => format!("{}.html#{}", self.docname, anchor),
            _ => format!("{}.html", self.docname),
        }
    }
}

/// A fuzzy "did you mean" candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    /// Jaro-Winkler similarity, 0.0 to 1.0.
    pub score: f64,
}

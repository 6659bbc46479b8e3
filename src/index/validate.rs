//! Structural integrity checks for a loaded search index.

use super::model::{DocIndex, Postings, SearchIndex};
use std::fmt;

/// A single integrity finding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexViolation {
    #[error("docnames has {docnames} entries but filenames has {filenames}")]
    FilenamesLength { docnames: usize, filenames: usize },
    #[error("docnames has {docnames} entries but titles has {titles}")]
    TitlesLength { docnames: usize, titles: usize },
    #[error("{section}[{key:?}] references document {doc}, but only {len} documents exist")]
    DocumentOutOfRange {
        section: &'static str,
        key: String,
        doc: DocIndex,
        len: usize,
    },
    #[error("{section}[{key:?}] has an empty postings list")]
    EmptyPostings { section: &'static str, key: String },
    #[error("objects[{namespace:?}] entry {name:?} uses unknown object type {objtype}")]
    UnknownObjectType {
        namespace: String,
        name: String,
        objtype: u32,
    },
}

/// Every violation found in one pass over an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<IndexViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "search index is consistent");
        }
        writeln!(f, "{} integrity violation(s):", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Check every cross-reference in the index.
pub fn validate(index: &SearchIndex) -> ValidationReport {
    let mut violations = Vec::new();
    let len = index.doc_count();

    if index.filenames.len() != len {
        violations.push(IndexViolation::FilenamesLength {
            docnames: len,
            filenames: index.filenames.len(),
        });
    }
    if index.titles.len() != len {
        violations.push(IndexViolation::TitlesLength {
            docnames: len,
            titles: index.titles.len(),
        });
    }

    let mut check_doc = |section: &'static str, key: &str, doc: DocIndex| {
        if doc >= len {
            violations.push(IndexViolation::DocumentOutOfRange {
                section,
                key: key.to_string(),
                doc,
                len,
            });
        }
    };

    for (title, refs) in &index.alltitles {
        for title_ref in refs {
            check_doc("alltitles", title, title_ref.doc());
        }
    }
    for (entry, refs) in &index.indexentries {
        for entry_ref in refs {
            check_doc("indexentries", entry, entry_ref.doc());
        }
    }
    for (namespace, entries) in &index.objects {
        for entry in entries {
            check_doc("objects", namespace, entry.doc());
        }
    }
    for (section, postings) in [("terms", &index.terms), ("titleterms", &index.titleterms)] {
        for (term, docs) in postings {
            for &doc in docs.docs() {
                check_doc(section, term, doc);
            }
        }
    }

    violations.extend(empty_postings("terms", &index.terms));
    violations.extend(empty_postings("titleterms", &index.titleterms));

    for object in index.objects() {
        let objtype = object.entry.objtype();
        if !index.objtypes.contains_key(&objtype.to_string()) {
            violations.push(IndexViolation::UnknownObjectType {
                namespace: object.namespace.to_string(),
                name: object.entry.name().to_string(),
                objtype,
            });
        }
    }

    if violations.is_empty() {
        tracing::debug!("Search index passed validation ({} documents)", len);
    } else {
        tracing::warn!("Search index has {} integrity violations", violations.len());
    }

    ValidationReport { violations }
}

fn empty_postings<'a>(
    section: &'static str,
    postings: &'a std::collections::BTreeMap<String, Postings>,
) -> impl Iterator<Item = IndexViolation> + 'a {
    postings
        .iter()
        .filter(|(_, docs)| docs.is_empty())
        .map(move |(term, _)| IndexViolation::EmptyPostings {
            section,
            key: term.clone(),
        })
}

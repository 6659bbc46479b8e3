//! Typed model of a generated documentation search index.
//!
//! Every cross-reference is an integer position into [`SearchIndex::docnames`];
//! [`SearchIndex::filenames`] and [`SearchIndex::titles`] are parallel to it.

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Position of a document in `docnames`.
pub type DocIndex = usize;

/// The full search index as registered by `Search.setIndex(...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Section title → every `(document, anchor)` carrying that heading.
    #[serde(default)]
    pub alltitles: BTreeMap<String, Vec<TitleRef>>,
    /// Document identifiers, indexed positionally.
    pub docnames: Vec<String>,
    /// Generator domain → schema version.
    #[serde(default)]
    pub envversion: BTreeMap<String, u32>,
    /// Source filenames, parallel to `docnames`.
    pub filenames: Vec<String>,
    /// Index term → entries pointing at documents.
    #[serde(default)]
    pub indexentries: BTreeMap<String, Vec<IndexEntry>>,
    /// Namespace → documented objects.
    #[serde(default)]
    pub objects: BTreeMap<String, Vec<ObjectEntry>>,
    /// Object type key → `(domain, kind, label)`.
    #[serde(default)]
    pub objnames: BTreeMap<String, ObjName>,
    /// Object type key → `"domain:kind"`.
    #[serde(default)]
    pub objtypes: BTreeMap<String, String>,
    /// Full-text token → postings.
    pub terms: BTreeMap<String, Postings>,
    /// Per-document title, parallel to `docnames`.
    pub titles: Vec<String>,
    /// Title token → postings.
    #[serde(default)]
    pub titleterms: BTreeMap<String, Postings>,
}

impl SearchIndex {
    pub fn doc_count(&self) -> usize {
        self.docnames.len()
    }

    pub fn docname(&self, doc: DocIndex) -> Option<&str> {
        self.docnames.get(doc).map(String::as_str)
    }

    pub fn filename(&self, doc: DocIndex) -> Option<&str> {
        self.filenames.get(doc).map(String::as_str)
    }

    pub fn title(&self, doc: DocIndex) -> Option<&str> {
        self.titles.get(doc).map(String::as_str)
    }

    /// Look up the `(domain, kind, label)` triple for an object type key.
    pub fn objname(&self, objtype: u32) -> Option<&ObjName> {
        self.objnames.get(&objtype.to_string())
    }

    /// Iterate over every documented object with its namespace.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.objects.iter().flat_map(|(namespace, entries)| {
            entries.iter().map(move |entry| ObjectRef {
                namespace: namespace.as_str(),
                entry,
            })
        })
    }

    /// Total number of postings across `terms`.
    pub fn posting_count(&self) -> usize {
        self.terms.values().map(Postings::len).sum()
    }
}

/// One occurrence of a heading: `(document, anchor)`. A missing anchor means the
/// heading is the page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRef(pub DocIndex, pub Option<String>);

impl TitleRef {
    pub const fn doc(&self) -> DocIndex {
        self.0
    }

    pub fn anchor(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

/// An index entry: `(document, anchor, is_main)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry(pub DocIndex, pub String, pub bool);

impl IndexEntry {
    pub const fn doc(&self) -> DocIndex {
        self.0
    }

    pub fn anchor(&self) -> &str {
        &self.1
    }

    pub const fn is_main(&self) -> bool {
        self.2
    }
}

/// A documented object: `(document, objtype, priority, anchor, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry(pub DocIndex, pub u32, pub i32, pub String, pub String);

impl ObjectEntry {
    pub const fn doc(&self) -> DocIndex {
        self.0
    }

    pub const fn objtype(&self) -> u32 {
        self.1
    }

    pub const fn priority(&self) -> i32 {
        self.2
    }

    pub fn name(&self) -> &str {
        &self.4
    }
}

/// `(domain, kind, label)`, e.g. `("py", "function", "Python function")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjName(pub String, pub String, pub String);

impl ObjName {
    pub fn domain(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> &str {
        &self.1
    }

    pub fn label(&self) -> &str {
        &self.2
    }
}

/// An object together with the namespace it was registered under.
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef<'a> {
    pub namespace: &'a str,
    pub entry: &'a ObjectEntry,
}

impl ObjectRef<'_> {
    /// `namespace.name`, or just `name` for the empty namespace.
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.entry.name().to_string()
        } else {
            format!("{}.{}", self.namespace, self.entry.name())
        }
    }

    /// Resolve the in-page anchor.
    ///
    /// An empty anchor stands for the full name; `-` stands for
    /// `kind-fullname`.
    pub fn anchor(&self, index: &SearchIndex) -> String {
        match self.entry.3.as_str() {
            "" => self.fullname(),
            "-" => {
                let kind = index
                    .objname(self.entry.objtype())
                    .map_or("object", ObjName::kind);
                format!("{}-{}", kind, self.fullname())
            }
            anchor => anchor.to_string(),
        }
    }
}

/// Documents containing a token.
///
/// The generator writes a bare integer when a token occurs in a single document
/// and a list otherwise; both spellings survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postings {
    Single(DocIndex),
    Many(Vec<DocIndex>),
}

impl Postings {
    pub fn docs(&self) -> &[DocIndex] {
        match self {
            Self::Single(doc) => std::slice::from_ref(doc),
            Self::Many(docs) => docs,
        }
    }

    pub fn len(&self) -> usize {
        self.docs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs().is_empty()
    }

    pub fn contains(&self, doc: DocIndex) -> bool {
        self.docs().contains(&doc)
    }
}

/// Tagged spelling used by non-self-describing formats (the postcard cache).
#[derive(Serialize)]
enum PostingsRef<'a> {
    Single(DocIndex),
    Many(&'a [DocIndex]),
}

#[derive(Deserialize)]
enum PostingsRepr {
    Single(DocIndex),
    Many(Vec<DocIndex>),
}

impl Serialize for Postings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            match self {
                Self::Single(doc) => serializer.serialize_u64(*doc as u64),
                Self::Many(docs) => docs.serialize(serializer),
            }
        } else {
            match self {
                Self::Single(doc) => PostingsRef::Single(*doc),
                Self::Many(docs) => PostingsRef::Many(docs),
            }
            .serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Postings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(PostingsVisitor)
        } else {
            Ok(match PostingsRepr::deserialize(deserializer)? {
                PostingsRepr::Single(doc) => Self::Single(doc),
                PostingsRepr::Many(docs) => Self::Many(docs),
            })
        }
    }
}

struct PostingsVisitor;

impl<'de> Visitor<'de> for PostingsVisitor {
    type Value = Postings;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document index or a list of document indices")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        usize::try_from(value)
            .map(Postings::Single)
            .map_err(|_| E::custom(format!("document index {} out of range", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        usize::try_from(value)
            .map(Postings::Single)
            .map_err(|_| E::custom(format!("negative document index {}", value)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut docs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(doc) = seq.next_element()? {
            docs.push(doc);
        }
        Ok(Postings::Many(docs))
    }
}

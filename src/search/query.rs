//! Query resolution over a loaded search index.
//!
//! Four passes feed one ranked list: documented objects, section titles, index
//! entries, and full-text postings. Hits for the same `(document, anchor)` are
//! collapsed to the best-scoring one.

use super::hit::{HitKind, SearchHit, Suggestion};
use super::scoring::{Scorer, coverage_score};
use super::tokenize::{Query, QueryWord, is_stem_variant, parse_query};
use crate::index::{DocIndex, Postings, SearchIndex};
use ahash::{AHashMap, AHashSet};
use rapidfuzz::distance::jaro_winkler;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};

/// Words shorter than this never produce partial (substring) term matches.
const MIN_PARTIAL_LENGTH: usize = 3;

/// Resolves queries against one index.
pub struct QueryEngine<'a> {
    index: &'a SearchIndex,
    scorer: Scorer,
    stemmer: Stemmer,
}

impl Debug for QueryEngine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEngine")
            .field("documents", &self.index.doc_count())
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self::with_scorer(index, Scorer::default())
    }

    pub fn with_scorer(index: &'a SearchIndex, scorer: Scorer) -> Self {
        Self {
            index,
            scorer,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Parse a query with this engine's stemmer.
    pub fn parse(&self, query: &str) -> Query {
        parse_query(query, &self.stemmer)
    }

    /// Search the index, returning at most `limit` hits ordered by score
    /// (descending), then label.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = self.parse(query);
        if query.is_empty() {
            return vec![];
        }

        let excluded_docs = self.excluded_docs(&query);
        let mut hits = Vec::new();
        hits.extend(self.object_hits(&query));
        hits.extend(self.title_hits(&query));
        hits.extend(self.index_entry_hits(&query));
        hits.extend(self.text_hits(&query));
        hits.retain(|hit| !excluded_docs.contains(&hit.doc));

        let total = hits.len();
        let hits = rank(hits, limit);
        tracing::debug!(
            "Query {:?}: {} candidate hits, {} returned",
            query.text,
            total,
            hits.len()
        );
        hits
    }

    /// Fuzzy "did you mean" candidates drawn from object names and titles.
    pub fn suggest(&self, query: &str, threshold: f64, limit: usize) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return vec![];
        }

        let mut seen = AHashSet::new();
        let candidates = self
            .index
            .objects()
            .map(|object| object.entry.name().to_string())
            .chain(self.index.alltitles.keys().cloned());

        let mut suggestions: Vec<Suggestion> = candidates
            .filter(|text| seen.insert(text.clone()))
            .filter_map(|text| {
                let score = jaro_winkler::similarity(needle.chars(), text.to_lowercase().chars());
                (score >= threshold).then_some(Suggestion { text, score })
            })
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
        suggestions.truncate(limit);
        suggestions
    }

    /// Documented objects whose full name contains a query word.
    fn object_hits(&self, query: &Query) -> Vec<SearchHit> {
        let words: Vec<&str> = query.words.iter().map(|w| w.raw.as_str()).collect();
        let mut hits = Vec::new();

        for object in self.index.objects() {
            let doc = object.entry.doc();
            let fullname = object.fullname();
            let fullname_lower = fullname.to_lowercase();
            let name_lower = object.entry.name().to_lowercase();
            let description = self
                .index
                .objname(object.entry.objtype())
                .map(|name| name.label().to_string());

            // Other words may match anywhere in the object's description
            let haystack = format!(
                "{} {} {}",
                fullname_lower,
                description.as_deref().unwrap_or_default().to_lowercase(),
                self.index.title(doc).unwrap_or_default().to_lowercase()
            );

            let best = words
                .iter()
                .filter(|word| fullname_lower.contains(*word))
                .filter(|word| {
                    words
                        .iter()
                        .filter(|other| other != word)
                        .all(|other| haystack.contains(*other))
                })
                .map(|word| {
                    if name_lower == *word || fullname_lower == *word || query.text == fullname_lower
                    {
                        self.scorer.obj_name_match
                    } else if name_lower.contains(*word) {
                        self.scorer.obj_partial_match
                    } else {
                        0
                    }
                })
                .max();

            if let Some(score) = best {
                hits.push(self.hit(
                    doc,
                    Some(object.anchor(self.index)),
                    fullname,
                    description,
                    HitKind::Object,
                    score + self.scorer.priority_bonus(object.entry.priority()),
                ));
            }
        }

        hits
    }

    /// Section titles containing the query text.
    fn title_hits(&self, query: &Query) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for (title, refs) in &self.index.alltitles {
            let title_lower = title.trim().to_lowercase();
            if !title_lower.contains(&query.text) {
                continue;
            }
            let score = coverage_score(self.scorer.title, &query.text, &title_lower);
            for title_ref in refs {
                // Whole-page titles outrank section headings with the same text
                let boost = i32::from(title_ref.anchor().is_none());
                hits.push(self.hit(
                    title_ref.doc(),
                    title_ref.anchor().map(String::from),
                    title.clone(),
                    None,
                    HitKind::Title,
                    score + boost,
                ));
            }
        }
        hits
    }

    /// Index entries containing the query text.
    fn index_entry_hits(&self, query: &Query) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for (entry, refs) in &self.index.indexentries {
            if !entry.to_lowercase().contains(&query.text) {
                continue;
            }
            let score = coverage_score(100, &query.text, entry);
            for entry_ref in refs {
                let bonus = if entry_ref.is_main() {
                    self.scorer.main_entry
                } else {
                    0
                };
                let anchor = Some(entry_ref.anchor())
                    .filter(|anchor| !anchor.is_empty())
                    .map(String::from);
                hits.push(self.hit(
                    entry_ref.doc(),
                    anchor,
                    entry.clone(),
                    None,
                    HitKind::Index,
                    score + bonus,
                ));
            }
        }
        hits
    }

    /// Pages matching every query word in their text or titles.
    fn text_hits(&self, query: &Query) -> Vec<SearchHit> {
        if query.words.is_empty() {
            return vec![];
        }

        // doc → best score per word
        let mut per_doc: BTreeMap<DocIndex, Vec<i32>> = BTreeMap::new();
        for (position, word) in query.words.iter().enumerate() {
            for (doc, score) in self.word_scores(word) {
                let scores = per_doc
                    .entry(doc)
                    .or_insert_with(|| vec![0; query.words.len()]);
                scores[position] = scores[position].max(score);
            }
        }

        per_doc
            .into_iter()
            .filter(|(_, scores)| scores.iter().all(|score| *score > 0))
            .map(|(doc, scores)| {
                let score = scores.into_iter().max().unwrap_or_default();
                let title = self.index.title(doc).unwrap_or_default().to_string();
                self.hit(doc, None, title, None, HitKind::Text, score)
            })
            .collect()
    }

    /// Best score per document for one word across `terms` and `titleterms`.
    fn word_scores(&self, word: &QueryWord) -> AHashMap<DocIndex, i32> {
        let mut scores = AHashMap::new();
        let long_enough = word.raw.chars().count() >= MIN_PARTIAL_LENGTH;

        let sections: [(&BTreeMap<String, Postings>, i32, i32); 2] = [
            (&self.index.terms, self.scorer.term, self.scorer.partial_term),
            (
                &self.index.titleterms,
                self.scorer.title,
                self.scorer.partial_title,
            ),
        ];

        for (postings, exact, partial) in sections {
            for (term, docs) in postings {
                let term = term.to_lowercase();
                let score = if term == word.stem
                    || term == word.raw
                    || is_stem_variant(&term, &word.raw)
                    || is_stem_variant(&term, &word.stem)
                {
                    exact
                } else if long_enough && (term.contains(&word.stem) || term.contains(&word.raw)) {
                    partial
                } else {
                    continue;
                };

                for &doc in docs.docs() {
                    let best = scores.entry(doc).or_insert(0);
                    *best = (*best).max(score);
                }
            }
        }

        scores
    }

    /// Documents containing any excluded word exactly.
    fn excluded_docs(&self, query: &Query) -> AHashSet<DocIndex> {
        let mut docs = AHashSet::new();
        for word in &query.excluded {
            for postings in [&self.index.terms, &self.index.titleterms] {
                for key in [&word.stem, &word.raw] {
                    if let Some(found) = postings.get(key.as_str()) {
                        docs.extend(found.docs().iter().copied());
                    }
                }
            }
        }
        docs
    }

    fn hit(
        &self,
        doc: DocIndex,
        anchor: Option<String>,
        label: String,
        description: Option<String>,
        kind: HitKind,
        score: i32,
    ) -> SearchHit {
        SearchHit {
            doc,
            docname: self.index.docname(doc).unwrap_or_default().to_string(),
            filename: self.index.filename(doc).unwrap_or_default().to_string(),
            title: self.index.title(doc).unwrap_or_default().to_string(),
            anchor,
            label,
            description,
            kind,
            score,
        }
    }
}

/// Sort by score then label, drop duplicate `(document, anchor)` pairs keeping
/// the best, and truncate.
fn rank(mut hits: Vec<SearchHit>, limit: usize) -> Vec<SearchHit> {
    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    let mut seen = AHashSet::new();
    hits.retain(|hit| seen.insert((hit.doc, hit.anchor.clone())));
    hits.truncate(limit);
    hits
}

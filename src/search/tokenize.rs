//! Query tokenization and stemming.

use rust_stemmers::Stemmer;

/// Common English stop words to filter out of queries.
/// These high-frequency words are never indexed by the generator either.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "will", "with",
];

/// A normalized query word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord {
    /// Lowercased word as typed.
    pub raw: String,
    /// English stem of `raw`.
    pub stem: String,
}

/// A parsed query: the lowercased text plus its required and excluded words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// The lowercased query without its `-` chunks, whitespace runs
    /// collapsed. Title, index-entry and full-name matching use this.
    pub text: String,
    pub words: Vec<QueryWord>,
    /// Words prefixed with `-`: documents containing them are dropped.
    pub excluded: Vec<QueryWord>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.text.is_empty()
    }
}

/// Split text into word tokens. Word characters are alphanumerics and `_`, the
/// same alphabet the generator uses for its terms.
pub(crate) fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

/// Parse a query string into stemmed words.
///
/// Whitespace-separated chunks starting with `-` mark exclusions; stop words
/// are dropped and duplicates collapse.
pub fn parse_query(query: &str, stemmer: &Stemmer) -> Query {
    let lowered = query.to_lowercase();
    let mut parsed = Query::default();
    let mut kept = Vec::new();

    for chunk in lowered.split_whitespace() {
        let (body, excluded) = match chunk.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => {
                kept.push(chunk);
                (chunk, false)
            }
        };

        for word in split_words(body) {
            let Some(token) = normalize(word, stemmer) else {
                continue;
            };
            let target = if excluded {
                &mut parsed.excluded
            } else {
                &mut parsed.words
            };
            if !target.contains(&token) {
                target.push(token);
            }
        }
    }

    parsed.text = kept.join(" ");
    parsed
}

/// Lowercase and stem a word, filtering out stop words.
pub(crate) fn normalize(word: &str, stemmer: &Stemmer) -> Option<QueryWord> {
    let lowercase = word.to_lowercase();

    // Skip stop words
    if STOP_WORDS.contains(&lowercase.as_str()) {
        return None;
    }

    let stem = stemmer.stem(&lowercase).into_owned();
    Some(QueryWord {
        raw: lowercase,
        stem,
    })
}

/// Whether an index term is a stem of `word` under a different stemming
/// algorithm: a prefix at most one character shorter (`cas` for `case`).
pub(crate) fn is_stem_variant(term: &str, word: &str) -> bool {
    term.len() >= 3 && word.len() > term.len() && word.len() - term.len() <= 1 && word.starts_with(term)
}

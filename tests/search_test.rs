//! Integration tests for querying the generated index.

mod common;

use assert2::{check, let_assert};
use common::site_index;
use rstest::rstest;
use std::sync::Arc;
use tidystring::index::SearchIndex;
use tidystring::search::{HitKind, QueryEngine, relative_relevance};

/// Test: An exact function name links to its API anchor
#[rstest]
fn test_function_name_links_to_reference(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("camel_to_snake", 10);

    let_assert!(Some(top) = hits.first());
    check!(top.docname == "api-ref");
    check!(top.href() == "api-ref.html#tidystring.camel_to_snake");
    check!(
        hits.iter()
            .filter(|hit| hit.anchor.as_deref() == Some("tidystring.camel_to_snake"))
            .count()
            == 1
    );
}

/// Test: The exact object outranks objects that merely contain the query
#[rstest]
fn test_exact_object_beats_partial(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("str_locate", 10);

    let position = |anchor: &str| {
        hits.iter()
            .position(|hit| hit.anchor.as_deref() == Some(anchor))
    };
    let_assert!(Some(exact) = position("tidystring.str_locate"));
    let_assert!(Some(partial) = position("tidystring.str_locate_all"));
    check!(exact < partial);
}

/// Test: A page title query lands on that page
#[rstest]
fn test_page_title(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("Detection", 10);

    let_assert!(Some(top) = hits.first());
    check!(top.kind == HitKind::Title);
    check!(top.docname == "usage/string_detection");
    check!(top.href() == "usage/string_detection.html");
    check!(
        hits.iter()
            .any(|hit| hit.anchor.as_deref() == Some("pattern-detection")),
        "section heading should also match: {:?}",
        hits
    );
}

/// Test: Full-text matches use stemmed words
#[rstest]
fn test_stemmed_text_match(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("wrapping", 20);
    check!(
        hits.iter().any(|hit| hit.docname == "usage/string_basics"),
        "hits: {:?}",
        hits
    );
}

/// Test: Excluded words remove every page containing them
#[rstest]
fn test_exclusion(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("detect -regex", 50);

    check!(!hits.is_empty());
    // regex appears on api-ref, cheats, index, and usage/string_utilities
    for hit in &hits {
        check!(![0, 1, 2, 10].contains(&hit.doc), "excluded page returned: {:?}", hit);
    }
}

/// Test: An exclusion no page contains leaves title matches alone
#[rstest]
fn test_unmatched_exclusion_keeps_titles(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    let titles = |query: &str| -> Vec<(String, Option<String>)> {
        engine
            .search(query, 20)
            .into_iter()
            .filter(|hit| hit.kind == HitKind::Title)
            .map(|hit| (hit.docname, hit.anchor))
            .collect()
    };

    let plain = titles("detection");
    check!(plain.contains(&("usage/string_detection".to_string(), None)));
    check!(titles("detection -zzzz") == plain);
}

/// Test: Hits are ordered, unique per location, and limited
#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
fn test_ranking_invariants(site_index: Arc<SearchIndex>, #[case] limit: usize) {
    let engine = QueryEngine::new(&site_index);
    let hits = engine.search("str", limit);

    check!(hits.len() <= limit);
    check!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));

    let mut locations: Vec<_> = hits.iter().map(|hit| (hit.doc, hit.anchor.clone())).collect();
    locations.sort();
    locations.dedup();
    check!(locations.len() == hits.len());

    if let Some(top) = hits.first() {
        check!(relative_relevance(top.score, top.score) == 100);
    }
}

/// Test: Nonsense queries return nothing but typos get suggestions
#[rstest]
fn test_suggestions(site_index: Arc<SearchIndex>) {
    let engine = QueryEngine::new(&site_index);
    check!(engine.search("zzyzx", 10).is_empty());

    let suggestions = engine.suggest("str_detet", 0.8, 5);
    let_assert!(Some(best) = suggestions.first());
    check!(best.text == "str_detect");
    check!(suggestions.windows(2).all(|pair| pair[0].score >= pair[1].score));

    check!(engine.suggest("qqqqqqqq", 0.8, 5).is_empty());
}

//! Search relevance and ranking weights.
//!
//! The weights mirror what documentation search widgets ship with, so results
//! rank the way readers of the rendered site expect.

/// Score weights for each kind of match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    /// Query equals an object's short or full name.
    pub obj_name_match: i32,
    /// Query is contained in an object's short name.
    pub obj_partial_match: i32,
    /// Bonus by object priority `0`, `1`, `2`.
    pub obj_prio: [i32; 3],
    /// Bonus for any other priority.
    pub obj_prio_default: i32,
    /// Exact title term, and the weight of a full-length title match.
    pub title: i32,
    /// Title term containing the query word.
    pub partial_title: i32,
    /// Exact full-text term.
    pub term: i32,
    /// Full-text term containing the query word.
    pub partial_term: i32,
    /// Bonus for index entries marked as the main entry.
    pub main_entry: i32,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio: [15, 5, -5],
            obj_prio_default: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
            main_entry: 5,
        }
    }
}

impl Scorer {
    /// Bonus for an object's priority flag.
    pub fn priority_bonus(&self, priority: i32) -> i32 {
        usize::try_from(priority)
            .ok()
            .and_then(|idx| self.obj_prio.get(idx))
            .copied()
            .unwrap_or(self.obj_prio_default)
    }
}

/// Scale `weight` by how much of `text` the query covers.
///
/// Lengths are counted in characters; a query covering the whole text scores
/// the full weight.
pub fn coverage_score(weight: i32, query: &str, text: &str) -> i32 {
    let text_len = text.chars().count();
    if text_len == 0 {
        return 0;
    }
    let query_len = query.chars().count();
    (f64::from(weight) * query_len as f64 / text_len as f64).round() as i32
}

/// Relevance of `score` relative to the best score, as a percentage.
pub fn relative_relevance(score: i32, best: i32) -> u8 {
    if best <= 0 {
        return 100;
    }
    ((f64::from(score.max(0)) / f64::from(best)) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8
}

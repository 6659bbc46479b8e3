//! Reading and writing the `Search.setIndex(...)` registration script.

use super::model::SearchIndex;
use crate::error::LoadError;
use std::path::Path;
use std::sync::Arc;

/// Name of the registration call wrapping the JSON payload.
pub const REGISTRATION_CALL: &str = "Search.setIndex";

/// Strip the registration wrapper, returning the JSON payload.
///
/// Bare JSON is passed through unchanged, so exported `.json` dumps load the
/// same way as the generated script.
pub fn unwrap_payload(source: &str) -> Result<&str, LoadError> {
    let trimmed = source.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    let payload = trimmed
        .strip_prefix(REGISTRATION_CALL)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| {
            let rest = rest.trim_end();
            let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
            rest.strip_suffix(')')
        })
        .ok_or_else(|| LoadError::MissingWrapper {
            prefix: trimmed.chars().take(24).collect(),
        })?;

    Ok(payload.trim())
}

/// Parse the registration script (or bare JSON) into a [`SearchIndex`].
pub fn parse_index(source: &str) -> Result<SearchIndex, LoadError> {
    let payload = unwrap_payload(source)?;
    let index: SearchIndex = serde_json::from_str(payload)?;
    tracing::debug!(
        "Parsed search index: {} documents, {} terms, {} titles",
        index.doc_count(),
        index.terms.len(),
        index.alltitles.len()
    );
    Ok(index)
}

/// Serialize an index back into the registration script.
pub fn to_script(index: &SearchIndex) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(index)?;
    Ok(format!("{}({})", REGISTRATION_CALL, json))
}

/// Serialize an index as pretty-printed JSON.
pub fn to_pretty_json(index: &SearchIndex) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(index)
}

/// Read and parse an index from disk.
///
/// The index is write-once data: it is handed out behind an `Arc` and never
/// mutated after this call.
pub fn load_index(path: &Path) -> Result<Arc<SearchIndex>, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_index(&source).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    const MINIMAL: &str = r#"{"docnames": ["index"], "filenames": ["index.rst"], "terms": {"hello": 0}, "titles": ["Home"]}"#;

    #[rstest]
    #[case(format!("Search.setIndex({})", MINIMAL))]
    #[case(format!("Search.setIndex({});\n", MINIMAL))]
    #[case(format!("  Search.setIndex ( {} )  ", MINIMAL))]
    #[case(MINIMAL.to_string())]
    fn test_unwrap_accepts_wrapped_and_bare(#[case] source: String) {
        let index = parse_index(&source).unwrap();
        check!(index.docnames == vec!["index".to_string()]);
        check!(index.titles == vec!["Home".to_string()]);
    }

    #[rstest]
    #[case("var index = {}")]
    #[case("Search.setIndex({}")]
    #[case("")]
    fn test_unwrap_rejects_unknown_wrappers(#[case] source: &str) {
        check!(matches!(
            unwrap_payload(source),
            Err(LoadError::MissingWrapper { .. })
        ));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let result = parse_index(r#"Search.setIndex({"docnames": []})"#);
        check!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_script_round_trip() {
        let index = parse_index(MINIMAL).unwrap();
        let script = to_script(&index).unwrap();
        check!(script.starts_with("Search.setIndex({"));
        check!(parse_index(&script).unwrap() == index);
    }
}

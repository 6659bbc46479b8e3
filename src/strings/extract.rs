//! Substring extraction and splitting.

use super::pattern::compile;
use super::shape::StrShape;
use crate::error::TidyError;

/// First match of `pattern`.
///
/// When the pattern has capture groups, the first group is returned instead of
/// the whole match. A group that did not participate yields `None`.
pub fn str_extract<S>(input: &S, pattern: &str) -> Result<S::Out<Option<String>>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    let group = usize::from(regex.captures_len() > 1);
    Ok(input.map_str(|s| {
        regex
            .captures(s)
            .and_then(|caps| caps.get(group))
            .map(|m| m.as_str().to_string())
    }))
}

/// Characters `start..end`, with negative positions counted from the end.
///
/// Out-of-range positions are clamped, so an empty range yields `""`.
pub fn str_sub<S>(input: &S, start: isize, end: Option<isize>) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| {
        let len = s.chars().count();
        let from = clamp_position(start, len);
        let to = end.map_or(len, |end| clamp_position(end, len));
        if from >= to {
            return String::new();
        }
        s.chars().skip(from).take(to - from).collect()
    })
}

fn clamp_position(position: isize, len: usize) -> usize {
    if position < 0 {
        len.saturating_sub(position.unsigned_abs())
    } else {
        position.unsigned_abs().min(len)
    }
}

/// Split on `pattern`, at most `max_splits` times (`None` or `Some(0)` for no
/// limit).
///
/// A single-character pattern splits on that character literally; longer
/// patterns are regular expressions.
pub fn str_split<S>(
    input: &S,
    pattern: &str,
    max_splits: Option<usize>,
) -> Result<S::Out<Vec<String>>, TidyError>
where
    S: StrShape + ?Sized,
{
    let limit = max_splits.filter(|n| *n > 0).map(|n| n + 1);
    let mut chars = pattern.chars();

    if let (Some(sep), None) = (chars.next(), chars.next()) {
        return Ok(input.map_str(|s| match limit {
            Some(limit) => s.splitn(limit, sep).map(String::from).collect(),
            None => s.split(sep).map(String::from).collect(),
        }));
    }

    let regex = compile(pattern)?;
    Ok(input.map_str(|s| match limit {
        Some(limit) => regex.splitn(s, limit).map(String::from).collect(),
        None => regex.split(s).map(String::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::Column;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn test_extract_prefers_first_group() {
        check!(str_extract("hello world", r"h(\w+)").unwrap() == Some("ello".to_string()));
        check!(str_extract("hello world", r"\w{2}o").unwrap() == Some("llo".to_string()));
        check!(str_extract("python", r"\w{2}o").unwrap() == Some("tho".to_string()));
    }

    #[test]
    fn test_extract_without_match() {
        let words = ["hello world", "python test", "string operations"];
        check!(
            str_extract(&words, r"h(\w+)").unwrap()
                == vec![Some("ello".to_string()), Some("on".to_string()), None]
        );
        check!(str_extract("abc", r"(x)?abc").unwrap() == None);
    }

    #[rstest]
    #[case("hello world", 0, Some(5), "hello")]
    #[case("hello world", 6, None, "world")]
    #[case("hello", 1, Some(3), "el")]
    #[case("hello", -3, None, "llo")]
    #[case("hello", 0, Some(-1), "hell")]
    #[case("hello", 4, Some(2), "")]
    #[case("hello", 10, None, "")]
    #[case("héllo", 1, Some(2), "é")]
    fn test_sub(
        #[case] input: &str,
        #[case] start: isize,
        #[case] end: Option<isize>,
        #[case] expected: &str,
    ) {
        check!(str_sub(input, start, end) == expected);
    }

    #[rstest]
    #[case("hello world", " ", None, &["hello", "world"])]
    #[case("a b c d", " ", Some(2), &["a", "b", "c d"])]
    #[case("a.b.c", r"\.", None, &["a", "b", "c"])]
    #[case("a.b.c", r"\.", Some(1), &["a", "b.c"])]
    #[case("a.b.c", ".", None, &["a", "b", "c"])]
    #[case("a1b22c", r"\d+", Some(0), &["a", "b", "c"])]
    fn test_split(
        #[case] input: &str,
        #[case] pattern: &str,
        #[case] max_splits: Option<usize>,
        #[case] expected: &[&str],
    ) {
        check!(str_split(input, pattern, max_splits).unwrap() == expected);
    }

    #[test]
    fn test_split_column() {
        let column = Column::new("path", vec![Some("a/b".to_string()), None]);
        let parts = str_split(&column, "/", None).unwrap();
        check!(parts.values() == [Some(vec!["a".to_string(), "b".to_string()]), None]);
    }
}

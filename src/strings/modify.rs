//! String modification: replacement, whitespace, padding, wrapping, joining.

use super::pattern::compile;
use super::shape::{Column, StrShape};
use crate::error::TidyError;
use regex::{Captures, NoExpand};
use std::fmt;
use std::str::FromStr;

/// Characters [`str_dash_to_space`] replaces by default.
pub const DEFAULT_DASHES: [char; 2] = ['-', '_'];

/// Default separator for [`str_concat`] and column joins.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Replace matches of `pattern` with `replacement`, at most `n` of them when
/// given. `$1`-style group references in `replacement` are expanded.
pub fn str_replace<S>(
    input: &S,
    pattern: &str,
    replacement: &str,
    n: Option<usize>,
) -> Result<S::Out<String>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    // replacen treats 0 as "no limit"
    let limit = n.unwrap_or(0);
    if n == Some(0) {
        return Ok(input.map_str(str::to_string));
    }
    Ok(input.map_str(|s| regex.replacen(s, limit, replacement).into_owned()))
}

/// Delete every match of `pattern`.
pub fn str_remove<S>(input: &S, pattern: &str) -> Result<S::Out<String>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| regex.replace_all(s, NoExpand("")).into_owned()))
}

/// Replace each match with `f` applied to the matched text.
pub fn str_search_apply<S, F>(input: &S, pattern: &str, mut f: F) -> Result<S::Out<String>, TidyError>
where
    S: StrShape + ?Sized,
    F: FnMut(&str) -> String,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| {
        regex
            .replace_all(s, |caps: &Captures<'_>| f(&caps[0]))
            .into_owned()
    }))
}

/// Strip leading and trailing whitespace.
pub fn str_trim<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.trim().to_string())
}

/// Trim, then collapse every internal whitespace run to one space.
pub fn str_squish<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Which side [`str_pad`] fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    #[default]
    Both,
}

impl FromStr for Side {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "both" => Ok(Self::Both),
            other => Err(TidyError::InvalidSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        })
    }
}

/// Pad to `width` characters with `pad`. Strings already that wide are
/// unchanged; with [`Side::Both`] the odd character goes on the right.
pub fn str_pad<S>(input: &S, width: usize, side: Side, pad: char) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| {
        let len = s.chars().count();
        if len >= width {
            return s.to_string();
        }
        let fill = width - len;
        let (left, right) = match side {
            Side::Left => (fill, 0),
            Side::Right => (0, fill),
            Side::Both => (fill / 2, fill - fill / 2),
        };
        let mut padded = String::with_capacity(s.len() + fill * pad.len_utf8());
        padded.extend(std::iter::repeat_n(pad, left));
        padded.push_str(s);
        padded.extend(std::iter::repeat_n(pad, right));
        padded
    })
}

/// Repeat each string `times` times.
pub fn str_dup<S>(input: &S, times: usize) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.repeat(times))
}

/// Greedy word wrap to `width` characters per line.
///
/// The first line is indented by `indent` spaces and later lines by `exdent`.
/// Whitespace runs collapse to single spaces. Only words longer than
/// `width - exdent` are broken; a word that fits a continuation line is never
/// split, even when the first-line indent leaves less room.
pub fn str_wrap<S>(input: &S, width: usize, indent: usize, exdent: usize) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| wrap(s, width, indent, exdent))
}

fn wrap(text: &str, width: usize, indent: usize, exdent: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = " ".repeat(indent);
    let mut line_len = indent;
    let mut has_word = false;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let gap = usize::from(has_word);
            if line_len + gap + word.len() <= width {
                if has_word {
                    line.push(' ');
                }
                line.extend(word.iter());
                line_len += gap + word.len();
                has_word = true;
                break;
            }

            if has_word {
                lines.push(std::mem::take(&mut line));
            } else if word.len() <= width.saturating_sub(exdent) {
                // Only the first-line indent is in the way: keep the word whole
                line.extend(word.iter());
                line_len += word.len();
                has_word = true;
                break;
            } else {
                // The word is longer than any line: break it at the line edge
                let room = width.saturating_sub(line_len).max(1);
                let rest = word.split_off(room.min(word.len()));
                line.extend(word.iter());
                lines.push(std::mem::take(&mut line));
                word = rest;
            }
            line = " ".repeat(exdent);
            line_len = exdent;
            has_word = false;
            if word.is_empty() {
                break;
            }
        }
    }

    if has_word {
        lines.push(line);
    }
    lines.join("\n")
}

/// Replace each of `dashes` with a space.
pub fn str_dash_to_space<S>(input: &S, dashes: &[char]) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| {
        s.chars()
            .map(|c| if dashes.contains(&c) { ' ' } else { c })
            .collect()
    })
}

/// Join strings with `sep`.
pub fn str_concat<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Join columns row by row with `sep`.
///
/// A row missing in any column is missing in the result. The result is named
/// after the inputs joined with `sep`.
pub fn concat_columns(columns: &[&Column<String>], sep: &str) -> Result<Column<String>, TidyError> {
    let Some(first) = columns.first() else {
        return Ok(Column::new("", Vec::new()));
    };
    if let Some(other) = columns.iter().find(|c| c.len() != first.len()) {
        return Err(TidyError::LengthMismatch {
            expected: first.len(),
            actual: other.len(),
        });
    }

    let name = columns
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(sep);
    let values = (0..first.len())
        .map(|row| {
            columns
                .iter()
                .map(|c| c.get(row).map(String::as_str))
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(sep))
        })
        .collect();
    Ok(Column::new(name, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("hello world", "o", "X", None, "hellX wXrld")]
    #[case("hello world", "o", "X", Some(1), "hellX world")]
    #[case("hello world", "o", "X", Some(0), "hello world")]
    #[case("2024-01-05", r"(\d+)-(\d+)-(\d+)", "$3/$2/$1", None, "05/01/2024")]
    fn test_replace(
        #[case] input: &str,
        #[case] pattern: &str,
        #[case] replacement: &str,
        #[case] n: Option<usize>,
        #[case] expected: &str,
    ) {
        check!(str_replace(input, pattern, replacement, n).unwrap() == expected);
    }

    #[test]
    fn test_remove() {
        check!(str_remove("hello world", "o").unwrap() == "hell wrld");
        check!(str_remove(&["hello", "world"], "o").unwrap() == vec!["hell", "wrld"]);
        check!(str_remove("a$1b", r"\d").unwrap() == "a$b");
    }

    #[test]
    fn test_search_apply() {
        check!(str_search_apply("hello world", r"\w+", str::to_uppercase).unwrap() == "HELLO WORLD");
        let doubled = str_search_apply("ab12cd34", r"\d+", |m| {
            (m.parse::<u32>().unwrap_or_default() * 2).to_string()
        });
        check!(doubled.unwrap() == "ab24cd68");
    }

    #[test]
    fn test_whitespace() {
        check!(str_trim("  hello world  ") == "hello world");
        check!(str_squish("  hello    world  ") == "hello world");
        check!(str_squish(&[" a  b  c ", "\tx\ny "]) == vec!["a b c", "x y"]);
    }

    #[rstest]
    #[case(Side::Both, ' ', "  hello   ")]
    #[case(Side::Left, ' ', "     hello")]
    #[case(Side::Right, ' ', "hello     ")]
    #[case(Side::Left, '*', "*****hello")]
    fn test_pad(#[case] side: Side, #[case] pad: char, #[case] expected: &str) {
        check!(str_pad("hello", 10, side, pad) == expected);
    }

    #[test]
    fn test_pad_never_truncates() {
        check!(str_pad("hello world", 5, Side::Both, ' ') == "hello world");
    }

    #[test]
    fn test_side_parse() {
        check!("left".parse::<Side>().unwrap() == Side::Left);
        let_assert!(Err(TidyError::InvalidSide(side)) = "middle".parse::<Side>());
        check!(side == "middle");
    }

    #[test]
    fn test_dup() {
        check!(str_dup("abc", 3) == "abcabcabc");
        check!(str_dup(&["a", "b"], 3) == vec!["aaa", "bbb"]);
        check!(str_dup("abc", 0) == "");
    }

    #[rstest]
    #[case("A very long string that needs to be wrapped", 20, 0, 0, "A very long string\nthat needs to be\nwrapped")]
    #[case("one two three", 8, 2, 0, "  one\ntwo\nthree")]
    #[case("one two three", 9, 0, 2, "one two\n  three")]
    #[case("abcdefghij", 4, 0, 0, "abcd\nefgh\nij")]
    #[case("", 10, 0, 0, "")]
    #[case("hello", 12, 10, 0, "          hello")]
    #[case("hello world", 12, 10, 0, "          hello\nworld")]
    #[case("abcdefgh", 6, 4, 2, "    ab\n  cdef\n  gh")]
    fn test_wrap(
        #[case] input: &str,
        #[case] width: usize,
        #[case] indent: usize,
        #[case] exdent: usize,
        #[case] expected: &str,
    ) {
        check!(str_wrap(input, width, indent, exdent) == expected);
    }

    #[test]
    fn test_dash_to_space() {
        check!(str_dash_to_space("hello-world", &DEFAULT_DASHES) == "hello world");
        check!(str_dash_to_space(&["hello-world", "hello_world"], &DEFAULT_DASHES) == vec!["hello world", "hello world"]);
        check!(str_dash_to_space("a-b_c", &['-']) == "a b_c");
    }

    #[test]
    fn test_concat() {
        check!(str_concat(&["hello", "world"], DEFAULT_SEPARATOR) == "hello_world");
        check!(str_concat(&["hello", "world"], "-") == "hello-world");
    }

    #[test]
    fn test_concat_columns() {
        let left: Column = Column::from_values("a", ["x", "y"]);
        let right = Column::new("b", vec![Some("1".to_string()), None]);
        let joined = concat_columns(&[&left, &right], "_").unwrap();
        check!(joined.name() == "a_b");
        check!(joined.values() == [Some("x_1".to_string()), None]);

        let short: Column = Column::from_values("c", ["z"]);
        let_assert!(
            Err(TidyError::LengthMismatch { expected: 2, actual: 1 }) =
                concat_columns(&[&left, &short], "_")
        );
    }
}

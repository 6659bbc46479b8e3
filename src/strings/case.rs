//! Case conversion.

use super::pattern::compile;
use super::shape::StrShape;
use crate::error::TidyError;
use regex::Captures;
use std::fmt;
use std::str::FromStr;

/// Target case for [`str_search_recase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
    Title,
    /// `camelCase` to `snake_case`.
    Snake,
    /// `snake_case` to `CamelCase`.
    Camel,
}

impl Case {
    pub const ALL: [Self; 5] = [Self::Lower, Self::Upper, Self::Title, Self::Snake, Self::Camel];

    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Lower => s.to_lowercase(),
            Self::Upper => s.to_uppercase(),
            Self::Title => title_case(s),
            Self::Snake => camel_to_snake_one(s),
            Self::Camel => snake_to_camel_one(s),
        }
    }
}

impl FromStr for Case {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            "title" => Ok(Self::Title),
            "snakecase" => Ok(Self::Snake),
            "camelcase" => Ok(Self::Camel),
            other => Err(TidyError::UnsupportedCase(other.to_string())),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Title => "title",
            Self::Snake => "snakecase",
            Self::Camel => "camelcase",
        })
    }
}

pub fn str_to_upper<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(str::to_uppercase)
}

pub fn str_to_lower<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(str::to_lowercase)
}

/// Uppercase the first letter of every word and lowercase the rest. A word
/// starts at any letter not preceded by a letter.
pub fn str_to_title<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(title_case)
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Uppercase the first `n` characters.
pub fn str_upper_cut<S>(input: &S, n: usize) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| {
        let split = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
        let (head, tail) = s.split_at(split);
        let mut out = head.to_uppercase();
        out.push_str(tail);
        out
    })
}

/// `helloWorld` → `hello_world`: an underscore goes before every ASCII
/// uppercase letter except a leading one, then everything is lowercased.
pub fn camel_to_snake<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(camel_to_snake_one)
}

fn camel_to_snake_one(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// `hello_world` → `HelloWorld`. Each `_`-separated part is capitalized; empty
/// parts (from doubled or edge underscores) become `_`.
pub fn snake_to_camel<S>(input: &S) -> S::Out<String>
where
    S: StrShape + ?Sized,
{
    input.map_str(snake_to_camel_one)
}

fn snake_to_camel_one(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    let mut word: String = first.to_uppercase().collect();
                    word.push_str(&chars.as_str().to_lowercase());
                    word
                }
                None => "_".to_string(),
            }
        })
        .collect()
}

/// Change the case of every match of `pattern`.
pub fn str_search_recase<S>(input: &S, pattern: &str, case: Case) -> Result<S::Out<String>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| {
        regex
            .replace_all(s, |caps: &Captures<'_>| case.apply(&caps[0]))
            .into_owned()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn test_upper_lower() {
        check!(str_to_upper("hello world") == "HELLO WORLD");
        check!(str_to_lower(&["HELLO", "World"]) == vec!["hello", "world"]);
    }

    #[rstest]
    #[case("hello world", "Hello World")]
    #[case("hELLO wORLD", "Hello World")]
    #[case("python-code 3d", "Python-Code 3D")]
    #[case("", "")]
    fn test_title(#[case] input: &str, #[case] expected: &str) {
        check!(str_to_title(input) == expected);
    }

    #[rstest]
    #[case("hello", 1, "Hello")]
    #[case("hello", 2, "HEllo")]
    #[case("hi", 5, "HI")]
    #[case("éa", 1, "Éa")]
    fn test_upper_cut(#[case] input: &str, #[case] n: usize, #[case] expected: &str) {
        check!(str_upper_cut(input, n) == expected);
    }

    #[rstest]
    #[case("helloWorld", "hello_world")]
    #[case("HelloWorld", "hello_world")]
    #[case("stringOps", "string_ops")]
    #[case("getHTTP", "get_h_t_t_p")]
    fn test_camel_to_snake(#[case] input: &str, #[case] expected: &str) {
        check!(camel_to_snake(input) == expected);
    }

    #[rstest]
    #[case("hello_world", "HelloWorld")]
    #[case("snake_case", "SnakeCase")]
    #[case("_private", "_Private")]
    #[case("a__b", "A_B")]
    #[case("MIXED_case", "MixedCase")]
    fn test_snake_to_camel(#[case] input: &str, #[case] expected: &str) {
        check!(snake_to_camel(input) == expected);
    }

    #[test]
    fn test_search_recase() {
        check!(str_search_recase("hello WORLD", r"\w+", Case::Upper).unwrap() == "HELLO WORLD");
        check!(str_search_recase("helloWorld", r"\w+", Case::Snake).unwrap() == "hello_world");
        check!(str_search_recase("a hello_world b", r"\w+_\w+", Case::Camel).unwrap() == "a HelloWorld b");
    }

    #[test]
    fn test_case_parse() {
        for case in Case::ALL {
            check!(case.to_string().parse::<Case>().unwrap() == case);
        }
        let_assert!(Err(TidyError::UnsupportedCase(name)) = "kebab".parse::<Case>());
        check!(name == "kebab");
    }
}

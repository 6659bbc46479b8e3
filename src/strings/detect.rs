//! Pattern detection and measurement.

use super::pattern::{char_offset, compile};
use super::shape::StrShape;
use crate::error::TidyError;

/// Whether `pattern` matches anywhere in each string.
pub fn str_detect<S>(input: &S, pattern: &str) -> Result<S::Out<bool>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| regex.is_match(s)))
}

/// Number of non-overlapping matches of `pattern`.
pub fn str_count<S>(input: &S, pattern: &str) -> Result<S::Out<usize>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| regex.find_iter(s).count()))
}

/// Character offset of the first match, or `None` without a match.
pub fn str_locate<S>(input: &S, pattern: &str) -> Result<S::Out<Option<usize>>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| regex.find(s).map(|m| char_offset(s, m.start()))))
}

/// `(start, end)` character ranges of every match.
pub fn str_locate_all<S>(input: &S, pattern: &str) -> Result<S::Out<Vec<(usize, usize)>>, TidyError>
where
    S: StrShape + ?Sized,
{
    let regex = compile(pattern)?;
    Ok(input.map_str(|s| {
        regex
            .find_iter(s)
            .map(|m| (char_offset(s, m.start()), char_offset(s, m.end())))
            .collect()
    }))
}

/// Whether each string starts with the literal `prefix`.
pub fn str_startswith<S>(input: &S, prefix: &str) -> S::Out<bool>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.starts_with(prefix))
}

/// Whether each string ends with the literal `suffix`.
pub fn str_endswith<S>(input: &S, suffix: &str) -> S::Out<bool>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.ends_with(suffix))
}

/// Length in characters.
pub fn str_length<S>(input: &S) -> S::Out<usize>
where
    S: StrShape + ?Sized,
{
    input.map_str(|s| s.chars().count())
}

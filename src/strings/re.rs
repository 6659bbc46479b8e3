//! Regular expression building blocks.
//!
//! Each builder returns pattern source text, so builders nest freely:
//! `one_or_more(&chars("abc"))` is `[abc]+`. The lookaround builders produce
//! syntax the matching engine does not support; compiling those patterns
//! reports [`TidyError::Pattern`](crate::error::TidyError::Pattern).

/// Escape `text` so it matches literally.
pub fn literal(text: &str) -> String {
    regex::escape(text)
}

/// Alternation of every pattern.
pub fn or<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|")
}

pub fn either(left: &str, right: &str) -> String {
    format!("{}|{}", left, right)
}

/// Any one of `chars`, taken literally.
pub fn chars(chars: &str) -> String {
    format!("[{}]", literal(chars))
}

/// Any character not in `chars`.
pub fn not_chars(chars: &str) -> String {
    format!("[^{}]", literal(chars))
}

pub fn digit() -> &'static str {
    r"\d"
}

pub fn word() -> &'static str {
    r"\w"
}

pub fn space() -> &'static str {
    r"\s"
}

/// Any character except newline.
pub fn any() -> &'static str {
    "."
}

pub fn start() -> &'static str {
    "^"
}

pub fn end() -> &'static str {
    "$"
}

pub fn boundary() -> &'static str {
    r"\b"
}

pub fn zero_or_more(pattern: &str) -> String {
    format!("{}*", pattern)
}

pub fn one_or_more(pattern: &str) -> String {
    format!("{}+", pattern)
}

pub fn optional(pattern: &str) -> String {
    format!("{}?", pattern)
}

/// Exactly `n` repetitions.
pub fn repeat(pattern: &str, n: usize) -> String {
    format!("{}{{{}}}", pattern, n)
}

/// Between `min` and `max` repetitions; no upper bound without `max`.
pub fn repeat_range(pattern: &str, min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) => format!("{}{{{},{}}}", pattern, min, max),
        None => format!("{}{{{},}}", pattern, min),
    }
}

pub fn capture(pattern: &str) -> String {
    format!("({})", pattern)
}

/// Non-capturing group.
pub fn group(pattern: &str) -> String {
    format!("(?:{})", pattern)
}

pub fn lookahead(pattern: &str) -> String {
    format!("(?={})", pattern)
}

pub fn negative_lookahead(pattern: &str) -> String {
    format!("(?!{})", pattern)
}

/// `word` as a whole word, taken literally.
pub fn whole_word(word: &str) -> String {
    format!(r"\b{}\b", literal(word))
}

pub fn starts_with(pattern: &str) -> String {
    format!("^{}", pattern)
}

pub fn ends_with(pattern: &str) -> String {
    format!("{}$", pattern)
}

/// Any of `words` as a whole word, captured.
pub fn word_list<S: AsRef<str>>(words: &[S]) -> String {
    let escaped: Vec<String> = words.iter().map(|w| literal(w.as_ref())).collect();
    format!(r"\b({})\b", or(&escaped))
}

/// `YYYY-MM-DD` or `M/D/YYYY`.
pub fn date() -> &'static str {
    r"\b(\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4})\b"
}

/// `HH:MM` with optional `:SS`.
pub fn time() -> &'static str {
    r"\b([01]?\d|2[0-3]):[0-5]\d(:[0-5]\d)?\b"
}

pub fn email() -> &'static str {
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b"
}

pub fn url() -> &'static str {
    r"https?://[\w.-]+\.\w+(/[\w./\-?=&%]*)?"
}

/// US numbers such as `555-123-4567`, `(555) 123-4567`, `+1-555-123-4567`.
pub fn phone_us() -> &'static str {
    r"(\+?1[-.])?\(?\d{3}\)?[-. ]?\d{3}[-.]?\d{4}\b"
}

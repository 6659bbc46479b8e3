//! Compiled pattern cache.

use crate::error::TidyError;
use lru::LruCache;
use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

/// Maximum number of compiled patterns kept in memory.
const PATTERN_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(64).unwrap();

static PATTERNS: LazyLock<Mutex<LruCache<String, Regex>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(PATTERN_CACHE_SIZE)));

/// Compile `pattern`, reusing a cached program when one exists.
pub(crate) fn compile(pattern: &str) -> Result<Regex, TidyError> {
    // A poisoned lock only means another thread panicked mid-insert
    let mut cache = PATTERNS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern).map_err(|source| TidyError::Pattern {
        pattern: pattern.to_string(),
        source: Box::new(source),
    })?;
    tracing::trace!("Compiled pattern {:?}", pattern);
    cache.put(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Character offset of byte offset `byte` in `s`.
pub(crate) fn char_offset(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

//! Fingerprinted on-disk cache of parsed search indexes.
//!
//! Parsing a large generated index is the slow part of every CLI invocation, so
//! the parsed form is stored as a postcard blob keyed by the xxh3 hash of the
//! source bytes. A changed source never matches a stale blob.

use super::codec::parse_index;
use super::model::SearchIndex;
use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Hash of an index source file's bytes.
pub fn fingerprint(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    fingerprint: u64,
    index: &'a SearchIndex,
}

#[derive(Deserialize)]
struct CacheEntry {
    fingerprint: u64,
    index: SearchIndex,
}

/// Directory of cached, parsed indexes.
#[derive(Debug, Clone)]
pub struct IndexCache {
    dir: PathBuf,
}

impl IndexCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<cache_dir>/tidystring`, if the platform has a cache directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("tidystring"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache file for a given source path. Keyed by the canonical path so two
    /// sites' indexes never share an entry.
    pub fn entry_path(&self, source: &Path) -> PathBuf {
        let canonical = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        let key = xxh3_64(canonical.to_string_lossy().as_bytes());
        self.dir.join(format!("{:016x}.idx", key))
    }

    /// Load the parsed index for `source`, reusing the cache when the source is
    /// unchanged and refreshing it otherwise.
    pub async fn load_or_parse(&self, source: &Path) -> Result<Arc<SearchIndex>> {
        let bytes = tokio::fs::read(source)
            .await
            .with_context(|| format!("Failed to read search index {}", source.display()))?;
        let fingerprint = fingerprint(&bytes);
        let entry_path = self.entry_path(source);

        if let Some(index) = Self::load(&entry_path, fingerprint).await {
            tracing::debug!(
                "Loaded cached search index for {} ({} documents)",
                source.display(),
                index.doc_count()
            );
            return Ok(Arc::new(index));
        }

        let text = String::from_utf8(bytes)
            .with_context(|| format!("Search index {} is not UTF-8", source.display()))?;

        // Parse in spawn_blocking since it's CPU intensive
        let start = std::time::Instant::now();
        let index = tokio::task::spawn_blocking(move || parse_index(&text))
            .await
            .context("Index parsing task panicked")??;
        tracing::info!(
            "Parsed search index {} in {:?}",
            source.display(),
            start.elapsed()
        );

        let index = Arc::new(index);
        self.store(Arc::clone(&index), fingerprint, &entry_path).await;
        Ok(index)
    }

    /// Load a cache entry if it exists and matches the fingerprint.
    async fn load(path: &Path, fingerprint: u64) -> Option<SearchIndex> {
        let bytes = tokio::fs::read(path).await.ok()?;
        let path = path.to_path_buf();

        // Deserialize in spawn_blocking since it's CPU intensive
        tokio::task::spawn_blocking(move || match postcard::from_bytes::<CacheEntry>(&bytes) {
            Ok(entry) if entry.fingerprint == fingerprint => Some(entry.index),
            Ok(_) => {
                tracing::info!(
                    "Cache stale, will rebuild index (file: {})",
                    path.display()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Failed to deserialize cached index at {}: {}", path.display(), e);
                None
            }
        })
        .await
        .ok()?
    }

    /// Store an index, replacing any previous entry atomically.
    async fn store(&self, index: Arc<SearchIndex>, fingerprint: u64, path: &Path) {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            tracing::warn!("Failed to create cache directory {}: {}", self.dir.display(), e);
            return;
        }

        let path = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || -> Result<()> {
            let bytes = postcard::to_allocvec(&CacheEntryRef {
                fingerprint,
                index: &index,
            })
            .context("Failed to serialize search index")?;
            let tmp = path.with_extension("idx.tmp");
            std::fs::write(&tmp, bytes)
                .with_context(|| format!("Failed to write {}", tmp.display()))?;
            std::fs::rename(&tmp, &path)
                .with_context(|| format!("Failed to move cache into {}", path.display()))?;
            tracing::debug!("Cached search index to {}", path.display());
            Ok(())
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("{:#}", e),
            Err(e) => tracing::warn!("Index storing task panicked: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    const SOURCE: &str = r#"Search.setIndex({"docnames": ["index"], "filenames": ["index.rst"], "terms": {"hello": 0, "world": [0]}, "titles": ["Home"]})"#;

    #[tokio::test]
    async fn test_cache_hit_and_refresh() {
        let site = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let source = site.path().join("searchindex.js");
        std::fs::write(&source, SOURCE).unwrap();

        let cache = IndexCache::new(cache_dir.path());
        let first = cache.load_or_parse(&source).await.unwrap();
        check!(cache.entry_path(&source).exists());

        let second = cache.load_or_parse(&source).await.unwrap();
        check!(*first == *second);

        // A changed source must not be served from the stale entry
        std::fs::write(&source, SOURCE.replace("Home", "Start")).unwrap();
        let third = cache.load_or_parse(&source).await.unwrap();
        check!(third.titles == vec!["Start".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_rebuilt() {
        let site = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let source = site.path().join("searchindex.js");
        std::fs::write(&source, SOURCE).unwrap();

        let cache = IndexCache::new(cache_dir.path());
        std::fs::write(cache.entry_path(&source), b"garbage").unwrap();

        let index = cache.load_or_parse(&source).await.unwrap();
        check!(index.docnames == vec!["index".to_string()]);
    }
}

//! User configuration.
//!
//! Read from `<config dir>/tidystring/config.toml` unless a path is given.
//! Every field has a default, so an empty or missing file is valid.

use crate::error::Result;
use crate::index::IndexCache;
use crate::nav::{DEFAULT_LEVELS, DEFAULT_MARKER, NavExpander, SiteOptions};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub nav: NavConfig,
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Classes marking navigation levels to expand.
    pub levels: Vec<String>,
    /// Class added to expanded elements.
    pub marker: String,
    /// Files rewritten at once by the site pass.
    pub concurrency: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.iter().map(|l| l.to_string()).collect(),
            marker: DEFAULT_MARKER.to_string(),
            concurrency: SiteOptions::default().concurrency,
        }
    }
}

impl NavConfig {
    pub fn expander(&self) -> NavExpander {
        NavExpander::new(self.levels.iter().cloned(), self.marker.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum hits returned.
    pub limit: usize,
    /// Minimum Jaro-Winkler similarity for "did you mean" suggestions.
    pub suggestion_threshold: f64,
    /// Maximum suggestions shown when a search has no hits.
    pub suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            suggestion_threshold: 0.8,
            suggestions: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Cache parsed indexes between runs.
    pub enabled: bool,
    /// Cache directory; `~` is expanded. Defaults to the user cache dir.
    pub dir: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// The configured cache, if caching is enabled and a directory is known.
    pub fn index_cache(&self) -> Option<IndexCache> {
        if !self.enabled {
            return None;
        }
        let dir = match &self.dir {
            Some(dir) => PathBuf::from(expand_tilde(dir).as_ref()),
            None => IndexCache::default_dir()?,
        };
        Some(IndexCache::new(dir))
    }
}

impl Config {
    /// `<config dir>/tidystring/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tidystring").join("config.toml"))
    }

    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse configuration")
    }

    /// Load from `path`, or from the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (PathBuf::from(expand_tilde(path).as_ref()), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_file(&path).await
    }

    async fn load_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration at {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid configuration at {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

//! Site-wide expansion pass over a rendered documentation tree.

use super::expand::NavExpander;
use super::html::rewrite_html;
use crate::error::Result;
use anyhow::Context;
use futures::stream::{self, StreamExt};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Default number of files rewritten at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
    /// Maximum number of files processed concurrently.
    pub concurrency: usize,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Outcome for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub path: PathBuf,
    pub matched: usize,
    pub marked: usize,
}

/// Outcome of a site pass. Pages are sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub pages: Vec<PageReport>,
    pub dry_run: bool,
}

impl SiteReport {
    pub fn scanned(&self) -> usize {
        self.pages.len()
    }

    /// Pages that gained (or would gain) at least one marker.
    pub fn changed(&self) -> impl Iterator<Item = &PageReport> {
        self.pages.iter().filter(|page| page.marked > 0)
    }

    pub fn total_marked(&self) -> usize {
        self.pages.iter().map(|page| page.marked).sum()
    }
}

/// Collect every `.html` file under `root`, sorted. Ignore files and hidden
/// entries are not honoured.
pub fn html_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
        })
        .collect();
    files.sort();
    files
}

/// Rewrite every HTML page under `root` so its navigation is expanded.
pub async fn expand_site(
    root: &Path,
    expander: &NavExpander,
    options: SiteOptions,
) -> Result<SiteReport> {
    if !root.is_dir() {
        anyhow::bail!("Site root {} is not a directory", root.display());
    }

    let files = html_files(root);
    tracing::info!(
        "Expanding navigation in {} pages under {}",
        files.len(),
        root.display()
    );

    let mut pages: Vec<PageReport> = stream::iter(files)
        .map(|path| expand_page(path, expander, options.dry_run))
        .buffer_unordered(options.concurrency.max(1))
        .collect::<Vec<Result<PageReport>>>()
        .await
        .into_iter()
        .collect::<Result<_>>()?;
    pages.sort_by(|a, b| a.path.cmp(&b.path));

    let report = SiteReport {
        pages,
        dry_run: options.dry_run,
    };
    tracing::info!(
        "Marked {} elements in {} of {} pages{}",
        report.total_marked(),
        report.changed().count(),
        report.scanned(),
        if options.dry_run { " (dry run)" } else { "" }
    );
    Ok(report)
}

async fn expand_page(path: PathBuf, expander: &NavExpander, dry_run: bool) -> Result<PageReport> {
    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let rewrite = rewrite_html(expander, &html);
    if rewrite.changed() && !dry_run {
        tokio::fs::write(&path, rewrite.html.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Rewrote {} ({} marked)", path.display(), rewrite.marked);
    }

    Ok(PageReport {
        path,
        matched: rewrite.matched,
        marked: rewrite.marked,
    })
}

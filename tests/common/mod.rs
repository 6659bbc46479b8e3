//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `site_index`: The real generated search index, parsed once per test
//! - `rendered_site`: A temporary rendered site with navigation markup
//!
//! # Shared Infrastructure
//!
//! [`TempWorkspace`] provides a reusable temp directory abstraction for any test
//! that needs filesystem isolation.

use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tidystring::index::{SearchIndex, load_index};

/// Returns the project root directory (where Cargo.toml lives).
#[allow(dead_code)]
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Path of the real search index fixture.
#[allow(dead_code)]
pub fn fixture_index_path() -> PathBuf {
    project_root().join("tests/fixtures/searchindex.js")
}

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("usage/index.html", "<html></html>");
/// assert!(workspace.path().join("usage/index.html").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Reads a file from this workspace.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", path, e))
    }

    /// Copies a file from the real filesystem into this workspace.
    ///
    /// # Panics
    /// Panics if copying fails.
    pub fn copy_file(&self, source: &Path, dest_relative: &str) {
        let dest = self.root.join(dest_relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!(
                    "Failed to create parent directory for '{}': {}",
                    dest_relative, e
                )
            });
        }
        std::fs::copy(source, &dest).unwrap_or_else(|e| {
            panic!(
                "Failed to copy '{}' to '{}': {}",
                source.display(),
                dest_relative,
                e
            )
        });
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A sidebar as the documentation theme renders it: two top-level entries,
/// one with a nested second-level entry, plus an unrelated list.
#[allow(dead_code)]
pub const NAV_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="sidebar">
  <ul>
    <li class="toctree-l1"><a class="reference internal" href="overview.html">Introduction</a></li>
    <li class="toctree-l1"><a class="reference internal" href="usage/string_basics.html">The Basics</a>
      <ul>
        <li class="toctree-l2"><a class="reference internal" href="usage/string_basics.html#basic-operations">Basic Operations</a></li>
      </ul>
    </li>
    <li class="toctree-l1 current"><a class="reference internal" href="api-ref.html">API Reference</a></li>
  </ul>
</div>
<ul class="simple"><li>not navigation</li></ul>
</body>
</html>
"#;

/// A page without any navigation markup.
#[allow(dead_code)]
pub const PLAIN_PAGE: &str = "<html><body><p class=\"lead\">Nothing to expand.</p></body></html>\n";

/// The real generated search index.
#[allow(dead_code)]
#[fixture]
pub fn site_index() -> Arc<SearchIndex> {
    load_index(&fixture_index_path()).expect("fixture index parses")
}

/// A temporary rendered site: two pages with navigation, one without, and a
/// non-HTML asset.
#[allow(dead_code)]
#[fixture]
pub fn rendered_site() -> TempWorkspace {
    let site = TempWorkspace::new();
    site.create_file("index.html", NAV_PAGE);
    site.create_file("usage/string_case.html", NAV_PAGE);
    site.create_file("search.html", PLAIN_PAGE);
    site.create_file("_static/custom.js", "// not a page\n");
    site
}

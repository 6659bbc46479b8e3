//! Navigation-tree auto-expansion.
//!
//! Every element carrying one of the configured level classes gets the marker
//! class added. The rule is idempotent and a page without matching elements is
//! left untouched.

use super::dom::Document;
use std::fmt::Write;

/// Level classes expanded by default.
pub const DEFAULT_LEVELS: [&str; 2] = ["toctree-l1", "toctree-l2"];
/// Class added to expanded elements.
pub const DEFAULT_MARKER: &str = "current";

/// Prefix of navigation level classes (`toctree-l1`, `toctree-l2`, ...).
const LEVEL_PREFIX: &str = "toctree-l";

/// Outcome of one expansion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandReport {
    /// Elements carrying any level class.
    pub matched: usize,
    /// Elements that did not already carry the marker.
    pub newly_marked: usize,
}

impl ExpandReport {
    pub const fn changed(&self) -> bool {
        self.newly_marked > 0
    }
}

/// Marks navigation elements as expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavExpander {
    levels: Vec<String>,
    marker: String,
}

impl Default for NavExpander {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.iter().map(|l| l.to_string()).collect(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl NavExpander {
    pub fn new<I, S>(levels: I, marker: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut expander = Self {
            levels: Vec::new(),
            marker: marker.into(),
        };
        for level in levels {
            let level = level.into();
            if !expander.levels.contains(&level) {
                expander.levels.push(level);
            }
        }
        expander
    }

    /// Expand levels `toctree-l1` through `toctree-l{depth}`.
    pub fn with_depth(depth: usize) -> Self {
        Self::new(
            (1..=depth).map(|level| format!("{}{}", LEVEL_PREFIX, level)),
            DEFAULT_MARKER,
        )
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether a class list selects the element for expansion.
    pub fn selects<S: AsRef<str>>(&self, classes: &[S]) -> bool {
        classes
            .iter()
            .any(|class| self.levels.iter().any(|level| level == class.as_ref()))
    }

    /// Add the marker to every element carrying a level class.
    pub fn apply(&self, document: &mut Document) -> ExpandReport {
        let mut report = ExpandReport::default();

        // One walk, so an element carrying two level classes is counted once
        for node in document.select(|classes| self.selects(classes)) {
            report.matched += 1;
            if document.add_class(node, &self.marker) {
                report.newly_marked += 1;
            }
        }

        tracing::trace!(
            "Expanded {} of {} navigation elements",
            report.newly_marked,
            report.matched
        );
        report
    }

    /// Page-load script performing the same expansion in a browser.
    pub fn to_script(&self) -> String {
        let mut script = String::from("document.addEventListener(\"DOMContentLoaded\", function() {\n");
        script.push_str("    // Expand all nav items\n");
        for level in &self.levels {
            let _ = writeln!(
                script,
                "    document.querySelectorAll('li.{}').forEach(function(item) {{",
                escape_js(level)
            );
            let _ = writeln!(
                script,
                "        item.classList.add('{}');",
                escape_js(&self.marker)
            );
            script.push_str("    });\n");
        }
        script.push_str("});\n");
        script
    }
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

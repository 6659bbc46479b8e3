//! Apply the expansion rule to rendered HTML.
//!
//! Only start tags are touched: their `class` attribute gains the marker when
//! it carries a level class. Comments and `<script>`/`<style>` bodies pass
//! through unchanged, as does every byte outside a rewritten attribute.

use super::expand::NavExpander;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Comments and raw-text elements match as a whole so nothing inside them is
/// rewritten; only the `start` group is a candidate tag. Quoted attribute
/// values may contain `<` and `>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)<!--.*?-->",
        r#"|<script\b(?:"[^"]*"|'[^']*'|[^<>"'])*>.*?</script\s*>"#,
        r#"|<style\b(?:"[^"]*"|'[^']*'|[^<>"'])*>.*?</style\s*>"#,
        r#"|(?P<start><[a-z][a-z0-9:-]*(?:\s(?:"[^"]*"|'[^']*'|[^<>"'])*)?>)"#,
    ))
    .expect("start tag pattern is valid")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\sclass\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("class attribute pattern is valid")
});

/// Rewritten markup and what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub html: String,
    /// Start tags carrying a level class.
    pub matched: usize,
    /// Start tags that gained the marker.
    pub marked: usize,
}

impl Rewrite {
    pub const fn changed(&self) -> bool {
        self.marked > 0
    }
}

/// Add the marker class to every start tag carrying a level class.
pub fn rewrite_html(expander: &NavExpander, html: &str) -> Rewrite {
    let mut matched = 0;
    let mut marked = 0;

    let rewritten = TAG_RE.replace_all(html, |caps: &Captures<'_>| {
        let Some(tag) = caps.name("start").map(|m| m.as_str()) else {
            return caps[0].to_string();
        };
        let Some(attr) = CLASS_RE.captures(tag) else {
            return tag.to_string();
        };

        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map_or("", |m| m.as_str());
        let classes: Vec<&str> = value.split_whitespace().collect();
        if !expander.selects(&classes) {
            return tag.to_string();
        }
        matched += 1;
        if classes.contains(&expander.marker()) {
            return tag.to_string();
        }
        marked += 1;

        let (Some(whole), Some(prefix)) = (attr.get(0), attr.get(1)) else {
            return tag.to_string();
        };
        // Single-quoted values keep their quotes; everything else is double-quoted
        let quote = if attr.get(3).is_some() { '\'' } else { '"' };
        let mut updated = classes.join(" ");
        updated.push(' ');
        updated.push_str(expander.marker());

        format!(
            "{}{}{quote}{}{quote}{}",
            &tag[..whole.start()],
            prefix.as_str(),
            updated,
            &tag[whole.end()..],
        )
    });

    Rewrite {
        html: rewritten.into_owned(),
        matched,
        marked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(
        r#"<li class="toctree-l1"><a href="x.html">X</a></li>"#,
        r#"<li class="toctree-l1 current"><a href="x.html">X</a></li>"#
    )]
    #[case(
        r#"<li class='toctree-l2 has-children'>"#,
        r#"<li class='toctree-l2 has-children current'>"#
    )]
    #[case(r#"<li class=toctree-l1>"#, r#"<li class="toctree-l1 current">"#)]
    #[case(
        r#"<li id="a" CLASS = "toctree-l1" data-x="1">"#,
        r#"<li id="a" CLASS = "toctree-l1 current" data-x="1">"#
    )]
    #[case(
        r#"<li title="a > b" class="toctree-l1">"#,
        r#"<li title="a > b" class="toctree-l1 current">"#
    )]
    #[case(
        r#"<script>var t = 1;</script><li data-x='<' class="toctree-l2">"#,
        r#"<script>var t = 1;</script><li data-x='<' class="toctree-l2 current">"#
    )]
    fn test_rewrites_class_attribute(#[case] input: &str, #[case] expected: &str) {
        let rewrite = rewrite_html(&NavExpander::default(), input);
        check!(rewrite.html == expected);
        check!(rewrite.marked == 1);
    }

    #[rstest]
    #[case(r#"<li class="toctree-l3">"#)]
    #[case(r#"<li data-class="toctree-l1">"#)]
    #[case(r#"<!-- <li class="toctree-l1"> -->"#)]
    #[case(r#"<li class="toctree-l1 current">"#)]
    #[case("plain text, no tags")]
    #[case(r#"<script>var t = "<li class='toctree-l1'>";</script>"#)]
    #[case(r#"<SCRIPT type="text/javascript">x = '<li class="toctree-l2">';</SCRIPT >"#)]
    #[case("<style>li.x::before { content: \"<li class='toctree-l1'>\"; }</style>")]
    fn test_leaves_other_markup_alone(#[case] input: &str) {
        let rewrite = rewrite_html(&NavExpander::default(), input);
        check!(rewrite.html == input);
        check!(!rewrite.changed());
    }

    #[test]
    fn test_counts_matched_and_marked() {
        let html = r#"<ul><li class="toctree-l1 current"></li><li class="toctree-l2"></li></ul>"#;
        let rewrite = rewrite_html(&NavExpander::default(), html);
        check!(rewrite.matched == 2);
        check!(rewrite.marked == 1);
    }
}

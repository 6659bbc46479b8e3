//! Navigation auto-expansion: an element tree, the expansion rule, an HTML
//! rewriter, and a site-wide pass.

pub mod dom;
pub mod expand;
pub mod html;
pub mod site;

pub use dom::{Document, NodeId};
pub use expand::{DEFAULT_LEVELS, DEFAULT_MARKER, ExpandReport, NavExpander};
pub use html::{Rewrite, rewrite_html};
pub use site::{PageReport, SiteOptions, SiteReport, expand_site, html_files};

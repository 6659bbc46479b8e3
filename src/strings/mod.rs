//! The tidystring utilities: shape-preserving string operations, pattern
//! builders, and cheatsheets.
//!
//! Every operation accepts a single string, a slice or vector of strings, or a
//! [`Column`], and returns the same shape:
//!
//! ```
//! use tidystring::strings::{Column, str_to_upper};
//!
//! assert_eq!(str_to_upper("hello"), "HELLO");
//! assert_eq!(str_to_upper(&["a", "b"]), vec!["A", "B"]);
//!
//! let column = Column::new("name", vec![Some("x".to_string()), None]);
//! assert_eq!(str_to_upper(&column).values(), [Some("X".to_string()), None]);
//! ```

pub mod case;
pub mod cheatsheet;
pub mod detect;
pub mod extract;
pub mod modify;
mod pattern;
pub mod re;
pub mod shape;

pub use case::{
    Case, camel_to_snake, snake_to_camel, str_search_recase, str_to_lower, str_to_title,
    str_to_upper, str_upper_cut,
};
pub use cheatsheet::{Cheatsheet, Group, all_functions, cheatsheet};
pub use detect::{
    str_count, str_detect, str_endswith, str_length, str_locate, str_locate_all, str_startswith,
};
pub use extract::{str_extract, str_split, str_sub};
pub use modify::{
    DEFAULT_DASHES, DEFAULT_SEPARATOR, Side, concat_columns, str_concat, str_dash_to_space,
    str_dup, str_pad, str_remove, str_replace, str_search_apply, str_squish, str_trim, str_wrap,
};
pub use shape::{Column, StrShape, Table};

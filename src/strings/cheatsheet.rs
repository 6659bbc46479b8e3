//! Reference tables for the string utilities.

use crate::error::TidyError;
use std::fmt::{self, Write};
use std::str::FromStr;

/// A cheatsheet section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Basic,
    Case,
    Detection,
    Extraction,
    Modification,
    Regex,
    InputTypes,
}

impl Group {
    pub const ALL: [Self; 7] = [
        Self::Basic,
        Self::Case,
        Self::Detection,
        Self::Extraction,
        Self::Modification,
        Self::Regex,
        Self::InputTypes,
    ];

    /// Groups listing functions, in the order the combined sheet merges them.
    pub const FUNCTIONS: [Self; 5] = [
        Self::Basic,
        Self::Case,
        Self::Detection,
        Self::Extraction,
        Self::Modification,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Case => "case",
            Self::Detection => "detection",
            Self::Extraction => "extraction",
            Self::Modification => "modification",
            Self::Regex => "regex",
            Self::InputTypes => "input_types",
        }
    }

    /// This group's own table.
    pub fn sheet(self) -> Cheatsheet {
        match self {
            Self::Regex => Cheatsheet::from_rows(&["Pattern", "Description", "Example"], REGEX),
            Self::InputTypes => Cheatsheet::from_rows(
                &["Input Type", "Example Input", "Example Function", "Example Output", "Notes"],
                INPUT_TYPES,
            ),
            Self::Basic => function_sheet(BASIC),
            Self::Case => function_sheet(CASE),
            Self::Detection => function_sheet(DETECTION),
            Self::Extraction => function_sheet(EXTRACTION),
            Self::Modification => function_sheet(MODIFICATION),
        }
    }
}

impl FromStr for Group {
    type Err = TidyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| TidyError::UnknownGroup(s.to_string()))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type FunctionRow = [&'static str; 3];

const BASIC: &[FunctionRow] = &[
    ["str_length", "Get the length of a string", "str_length('hello') -> 5"],
    ["str_detect", "Detect if a pattern exists in a string", "str_detect('hello world', 'o') -> True"],
    ["str_extract", "Extract the first match of a pattern", r"str_extract('hello world', 'h(\w+)') -> 'ello'"],
    ["str_replace", "Replace all matches of a pattern", "str_replace('hello', 'l', 'X') -> 'heXXo'"],
    ["str_remove", "Remove all matches of a pattern", "str_remove('hello', 'l') -> 'heo'"],
    ["str_trim", "Remove whitespace from start and end", "str_trim('  hello  ') -> 'hello'"],
    ["str_to_upper", "Convert to uppercase", "str_to_upper('hello') -> 'HELLO'"],
    ["str_to_lower", "Convert to lowercase", "str_to_lower('HELLO') -> 'hello'"],
    ["str_to_title", "Convert to title case", "str_to_title('hello world') -> 'Hello World'"],
    ["str_split", "Split string by pattern", "str_split('a,b,c', ',') -> ['a', 'b', 'c']"],
    ["str_sub", "Extract substring from start/end positions", "str_sub('hello', 1, 3) -> 'el'"],
    ["str_count", "Count occurrences of a pattern", "str_count('hello', 'l') -> 2"],
];

const CASE: &[FunctionRow] = &[
    ["str_to_upper", "Convert to uppercase", "str_to_upper('hello') -> 'HELLO'"],
    ["str_to_lower", "Convert to lowercase", "str_to_lower('HELLO') -> 'hello'"],
    ["str_to_title", "Convert to title case", "str_to_title('hello world') -> 'Hello World'"],
    ["str_upper_cut", "Capitalize first n characters", "str_upper_cut('hello', 2) -> 'HEllo'"],
    ["camel_to_snake", "Convert camelCase to snake_case", "camel_to_snake('helloWorld') -> 'hello_world'"],
    ["snake_to_camel", "Convert snake_case to CamelCase", "snake_to_camel('hello_world') -> 'HelloWorld'"],
    [
        "str_search_recase",
        "Change case of matched pattern",
        r"str_search_recase('helloWorld', '\w+', 'snakecase') -> 'hello_world'",
    ],
];

const DETECTION: &[FunctionRow] = &[
    ["str_detect", "Detect if a pattern exists in a string", "str_detect('hello world', 'o') -> True"],
    ["str_startswith", "Check if string starts with a pattern", "str_startswith('hello', 'he') -> True"],
    ["str_endswith", "Check if string ends with a pattern", "str_endswith('hello', 'lo') -> True"],
    ["str_count", "Count occurrences of a pattern", "str_count('hello', 'l') -> 2"],
    ["str_locate", "Find position of first match", "str_locate('hello', 'l') -> 2"],
    ["str_locate_all", "Find positions of all matches", "str_locate_all('hello', 'l') -> [(2, 3), (3, 4)]"],
];

const EXTRACTION: &[FunctionRow] = &[
    ["str_extract", "Extract first match of a pattern", r"str_extract('hello world', 'h(\w+)') -> 'ello'"],
    ["str_sub", "Extract substring from start/end positions", "str_sub('hello', 1, 3) -> 'el'"],
    ["str_split", "Split string by pattern into components", "str_split('a,b,c', ',') -> ['a', 'b', 'c']"],
];

const MODIFICATION: &[FunctionRow] = &[
    ["str_replace", "Replace all matches of a pattern", "str_replace('hello', 'l', 'X') -> 'heXXo'"],
    ["str_remove", "Remove all matches of a pattern", "str_remove('hello', 'l') -> 'heo'"],
    ["str_trim", "Remove whitespace from start and end", "str_trim('  hello  ') -> 'hello'"],
    ["str_pad", "Pad a string to a specified width", "str_pad('hello', 10, 'both') -> '  hello   '"],
    ["str_squish", "Trim and replace internal whitespace", "str_squish('  hello    world  ') -> 'hello world'"],
    ["str_dup", "Duplicate a string n times", "str_dup('abc', 2) -> 'abcabc'"],
    ["str_wrap", "Wrap text to specified width", "str_wrap('long text...', 20)"],
    ["str_concat", "Concatenate strings with separator", "str_concat(['hello', 'world'], '-') -> 'hello-world'"],
    ["str_dash_to_space", "Replace dashes with spaces", "str_dash_to_space('hello-world') -> 'hello world'"],
    ["str_search_apply", "Apply a function to each regex match", r"str_search_apply('ab12', '\d+', double) -> 'ab24'"],
];

const REGEX: &[[&str; 3]] = &[
    [".", "Any character except newline", "'h.t' matches 'hat', 'hit', 'hot'"],
    [r"\w", "Word character (letter, digit, underscore)", r"'\w+' matches 'hello123'"],
    [r"\d", "Digit character", r"'\d+' matches '123'"],
    [r"\s", "Whitespace character", r"'\s+' matches spaces, tabs, newlines"],
    [r"\b", "Word boundary", r"'\bword\b' matches 'word' as whole word"],
    ["^", "Start of string", "'^start' matches 'start' at beginning"],
    ["$", "End of string", "'end$' matches 'end' at the end"],
    ["[abc]", "Any character in the set", "'[aeiou]' matches any vowel"],
    ["[^abc]", "Any character not in the set", "'[^0-9]' matches any non-digit"],
    ["a|b", "a or b", "'cat|dog' matches 'cat' or 'dog'"],
    ["a*", "0 or more a's", "'a*' matches '', 'a', 'aa', 'aaa'"],
    ["a+", "1 or more a's", "'a+' matches 'a', 'aa', 'aaa'"],
    ["a?", "0 or 1 a", "'colou?r' matches 'color' or 'colour'"],
    ["a{3}", "Exactly 3 a's", "'a{3}' matches 'aaa'"],
    ["a{2,4}", "2 to 4 a's", "'a{2,4}' matches 'aa', 'aaa', 'aaaa'"],
    ["(abc)", "Capturing group", r"'(\w+)@(\w+)' captures username and domain"],
    ["(?:abc)", "Non-capturing group", r"'(?:\w+)' groups without capturing"],
    ["(?=abc)", "Positive lookahead (not supported by the engine)", r"'(?=\d)\w+' matches word followed by digit"],
    ["(?!abc)", "Negative lookahead (not supported by the engine)", r"'(?!\d)\w+' matches word not followed by digit"],
];

const INPUT_TYPES: &[[&str; 5]] = &[
    ["Single string", "\"hello world\"", "str_to_upper", "\"HELLO WORLD\"", "Returns a String"],
    ["Slice or Vec of strings", "[\"hello\", \"world\"]", "str_to_upper", "vec![\"HELLO\", \"WORLD\"]", "Returns a Vec"],
    ["Column", "Column(\"text\", [\"hello\", missing])", "str_to_upper", "Column(\"text\", [\"HELLO\", missing])", "Returns a Column; missing stays missing"],
];

fn function_sheet(rows: &[FunctionRow]) -> Cheatsheet {
    Cheatsheet::from_rows(&["Function", "Description", "Example"], rows)
}

/// Every function the library documents, grouped by topic.
pub fn all_functions() -> &'static [&'static str] {
    &[
        // Basic
        "str_length",
        "str_detect",
        "str_extract",
        "str_replace",
        "str_remove",
        "str_trim",
        // Case conversion
        "str_to_upper",
        "str_to_lower",
        "str_to_title",
        "str_upper_cut",
        "camel_to_snake",
        "snake_to_camel",
        "str_search_recase",
        // Detection
        "str_startswith",
        "str_endswith",
        "str_count",
        "str_locate",
        "str_locate_all",
        // Extraction
        "str_sub",
        "str_split",
        // Modification
        "str_pad",
        "str_squish",
        "str_dup",
        "str_wrap",
        "str_concat",
        "str_dash_to_space",
        "str_search_apply",
    ]
}

/// The combined function reference, or one group's table.
///
/// Without a group, every function group is merged with a `Group` column,
/// keeping the first group a function appears in, and sorted by function name.
/// A function group returns its own rows with the `Group` column; `regex` and
/// `input_types` return their tables unchanged.
pub fn cheatsheet(group: Option<&str>) -> Result<Cheatsheet, TidyError> {
    let Some(group) = group else {
        return Ok(combined());
    };
    let group: Group = group.parse()?;
    if Group::FUNCTIONS.contains(&group) {
        Ok(group.sheet().with_constant("Group", group.as_str()))
    } else {
        Ok(group.sheet())
    }
}

fn combined() -> Cheatsheet {
    let mut sheet = Cheatsheet {
        columns: ["Function", "Description", "Example", "Group"]
            .map(String::from)
            .to_vec(),
        rows: Vec::new(),
    };
    for group in Group::FUNCTIONS {
        for mut row in group.sheet().rows {
            if sheet.rows.iter().any(|existing| existing[0] == row[0]) {
                continue;
            }
            row.push(group.as_str().to_string());
            sheet.rows.push(row);
        }
    }
    sheet.rows.sort_by(|a, b| a[0].cmp(&b[0]));
    sheet
}

/// A small text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cheatsheet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Cheatsheet {
    fn from_rows<const N: usize>(columns: &[&str; N], rows: &[[&str; N]]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        }
    }

    fn with_constant(mut self, column: &str, value: &str) -> Self {
        self.columns.push(column.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every cell of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Aligned plain-text rendering with a header rule.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.columns.len())
            .map(|i| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(self.columns[i].chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let mut out = String::new();
        write_row(&mut out, &self.columns, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(&mut out, &rule, &widths);
        for row in &self.rows {
            write_row(&mut out, row, &widths);
        }
        out
    }
}

impl fmt::Display for Cheatsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell, width = width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

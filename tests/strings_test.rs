//! Integration tests for the string utilities across input shapes.

use assert2::{check, let_assert};
use rstest::rstest;
use tidystring::TidyError;
use tidystring::strings::{
    Case, Column, Group, Side, Table, all_functions, camel_to_snake, cheatsheet, re,
    snake_to_camel, str_count, str_detect, str_extract, str_length, str_locate, str_pad,
    str_replace, str_search_recase, str_split, str_squish, str_sub, str_to_lower, str_to_title,
    str_trim,
};

const WORDS: [&str; 3] = ["hello world", "python test", "string ops"];

fn column(name: &str, values: &[Option<&str>]) -> Column {
    Column::new(name, values.iter().map(|v| v.map(String::from)).collect())
}

/// Test: Scalars, slices, vectors, and columns keep their shape
#[test]
fn test_shapes_are_preserved() {
    check!(camel_to_snake("helloWorld") == "hello_world");
    check!(camel_to_snake(&["helloWorld", "pythonTest"]) == vec!["hello_world", "python_test"]);

    let owned: Vec<String> = vec!["hello_world".into(), "string_ops".into()];
    check!(snake_to_camel(&owned) == vec!["HelloWorld", "StringOps"]);

    let series = column("raw", &[Some("HelloWorld"), None, Some("StringOps")]);
    let snake = camel_to_snake(&series);
    check!(snake.name() == "raw");
    check!(
        snake.values()
            == [Some("hello_world".to_string()), None, Some("string_ops".to_string())]
    );
}

/// Test: Detection, counting, and locating agree with each other
#[test]
fn test_detection_family() {
    check!(str_detect(&WORDS, "o").unwrap() == vec![true, true, true]);
    check!(str_count(&WORDS, "o").unwrap() == vec![2, 1, 1]);
    check!(str_locate(&WORDS, "t").unwrap() == vec![None, Some(2), Some(1)]);
    check!(str_length(&WORDS) == vec![11, 11, 10]);
}

/// Test: Extraction and substrings
#[test]
fn test_extraction_family() {
    check!(str_extract("hello world", r"e\w+").unwrap() == Some("ello".to_string()));
    check!(str_extract(&WORDS, r"h(\w+)").unwrap() == vec![Some("ello".to_string()), Some("on".to_string()), None]);
    check!(str_sub("hello world", 0, Some(5)) == "hello");
    check!(str_sub("hello world", -5, None) == "world");
    check!(str_split("a b c d", " ", Some(2)).unwrap() == vec!["a", "b", "c d"]);
}

/// Test: Replacement honours the count
#[rstest]
#[case(None, "hellX wXrld")]
#[case(Some(1), "hellX world")]
#[case(Some(0), "hello world")]
fn test_replace_count(#[case] n: Option<usize>, #[case] expected: &str) {
    check!(str_replace("hello world", "o", "X", n).unwrap() == expected);
}

/// Test: Recasing only the matched parts
#[rstest]
#[case(Case::Upper, "the QUICK brown fox")]
#[case(Case::Title, "the Quick brown fox")]
fn test_search_recase(#[case] case: Case, #[case] expected: &str) {
    check!(str_search_recase("the quick brown fox", "quick", case).unwrap() == expected);
}

/// Test: Pattern builders compose into working patterns
#[test]
fn test_builders_with_operations() {
    let text = "Call 555-123-4567 or mail ada@math.org before 2024-03-15";
    check!(str_detect(text, re::email()).unwrap());
    check!(str_detect(text, re::phone_us()).unwrap());
    check!(str_extract(text, re::date()).unwrap() == Some("2024-03-15".to_string()));

    let pet = re::word_list(&["cat", "dog"]);
    check!(str_detect(&["my dog", "catalog"], &pet).unwrap() == vec![true, false]);
}

/// Test: Unsupported syntax is reported, not panicked on
#[test]
fn test_invalid_pattern_error() {
    let_assert!(Err(TidyError::Pattern { pattern, .. }) = str_detect("abc", "(unclosed"));
    check!(pattern == "(unclosed");
    check!(str_detect("abc", &re::lookahead("b")).is_err());
}

/// Test: Cleaning a table column by column
#[test]
fn test_table_cleaning_workflow() {
    let mut table = Table::new()
        .with_column(column("first", &[Some("  ada "), Some("GRACE"), None]))
        .unwrap()
        .with_column(column("last", &[Some("lovelace"), Some(" hopper"), Some("turing")]))
        .unwrap();

    table
        .map_columns(&["first", "last"], |c| Ok(str_to_title(&str_squish(c))))
        .unwrap();
    check!(table.column("first").unwrap().values() == [Some("Ada".to_string()), Some("Grace".to_string()), None]);

    let full = table.concat(&["first", "last"], " ").unwrap();
    check!(full.name() == "first last");
    check!(full.values() == [Some("Ada Lovelace".to_string()), Some("Grace Hopper".to_string()), None]);

    let padded = str_pad(&full, 14, Side::Left, '.');
    check!(padded.get(0).map(String::as_str) == Some("..Ada Lovelace"));
}

/// Test: Unknown columns leave the table untouched
#[test]
fn test_table_unknown_column() {
    let mut table = Table::new()
        .with_column(column("name", &[Some(" A "), Some("b")]))
        .unwrap();
    let before = table.clone();

    let result = table.map_columns(&["name", "missing"], |c| Ok(str_trim(c)));
    let_assert!(Err(TidyError::UnknownColumn(name)) = result);
    check!(name == "missing");
    check!(table == before);

    let short = column("short", &[Some("x")]);
    check!(matches!(table.insert(short), Err(TidyError::LengthMismatch { expected: 2, actual: 1 })));
    check!(str_to_lower(table.column("name").unwrap()).values()[1] == Some("b".to_string()));
}

/// Test: A failure on a later column leaves earlier columns unchanged
#[rstest]
#[case::mapping_error(false)]
#[case::length_change(true)]
fn test_table_map_is_all_or_nothing(#[case] shorten: bool) {
    let mut table = Table::new()
        .with_column(column("first", &[Some(" ada "), Some("grace")]))
        .unwrap()
        .with_column(column("last", &[Some("lovelace"), None]))
        .unwrap();
    let before = table.clone();

    let result = table.map_columns(&["first", "last"], |c| {
        if c.name() != "last" {
            return Ok(str_to_title(&str_trim(c)));
        }
        if shorten {
            Ok(column("last", &[Some("x")]))
        } else {
            str_detect(c, "(").map(|_| c.clone())
        }
    });

    check!(result.is_err());
    check!(table == before);
}

/// Test: Cheatsheets list every function once
#[test]
fn test_cheatsheet_covers_functions() {
    let combined = cheatsheet(None).unwrap();
    let_assert!(Some(functions) = combined.column("Function"));
    check!(functions.len() == combined.len());

    let mut unique = functions.clone();
    unique.dedup();
    check!(unique.len() == functions.len());
    check!(functions.windows(2).all(|pair| pair[0] <= pair[1]));

    for name in all_functions() {
        check!(functions.contains(name), "missing {}", name);
    }

    let case = cheatsheet(Some("case")).unwrap();
    check!(case.column("Group").unwrap().iter().all(|g| *g == "case"));
    check!(cheatsheet(Some(Group::Regex.as_str())).unwrap().column("Group").is_none());
    check!(matches!(cheatsheet(Some("nope")), Err(TidyError::UnknownGroup(_))));
}

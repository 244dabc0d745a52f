//! Tests for delimited and fixed-width field splitting

use crate::parser::splitter::{
    FieldSplitter, combine_quote_parts, split_delimited, split_fixed_width,
};

#[test]
fn test_plain_delimited_line() {
    let split = split_delimited("224,M31,0.712,3.44", ',');
    assert_eq!(split.fields, vec!["224", "M31", "0.712", "3.44"]);
    assert!(!split.unterminated);
}

#[test]
fn test_quoted_field_containing_delimiter() {
    let split = split_delimited(r#"a,"b,c",d"#, ',');
    assert_eq!(split.fields, vec!["a", "b,c", "d"]);
    assert!(!split.unterminated);
}

#[test]
fn test_quoted_field_spanning_several_delimiters() {
    let split = split_delimited(r#"1,"NGC 224, M31, Andromeda",3.4"#, ',');
    assert_eq!(split.fields, vec!["1", "NGC 224, M31, Andromeda", "3.4"]);
}

#[test]
fn test_self_contained_quoted_token_loses_quotes() {
    let split = split_delimited(r#""M42",Orion"#, ',');
    assert_eq!(split.fields, vec!["M42", "Orion"]);
}

#[test]
fn test_empty_token_inside_quotes_is_kept() {
    let split = split_delimited(r#"x,"a,,b",y"#, ',');
    assert_eq!(split.fields, vec!["x", "a,,b", "y"]);
}

#[test]
fn test_unterminated_quote_stops_at_end_of_tokens() {
    let split = split_delimited(r#"a,"b,c,d"#, ',');
    assert_eq!(split.fields, vec!["a", "b,c,d"]);
    assert!(split.unterminated);
}

#[test]
fn test_unterminated_quote_on_last_token() {
    let split = combine_quote_parts(&["a", "\"b"], ',');
    assert_eq!(split.fields, vec!["a", "b"]);
    assert!(split.unterminated);
}

#[test]
fn test_empty_token_list() {
    let split = combine_quote_parts(&[], ',');
    assert!(split.fields.is_empty());
    assert!(!split.unterminated);
}

#[test]
fn test_other_delimiter_rejoined_with_same_delimiter() {
    let split = split_delimited(r#"a|"b|c"|d"#, '|');
    assert_eq!(split.fields, vec!["a", "b|c", "d"]);
}

#[test]
fn test_fixed_width_slicing() {
    let fields = split_fixed_width("abcdefgh12", &[3, 5]);
    assert_eq!(fields, vec!["abc", "defgh", "12"]);
}

#[test]
fn test_fixed_width_short_line_pads_with_empty_fields() {
    assert_eq!(split_fixed_width("abcd", &[3, 5]), vec!["abc", "d", ""]);
    assert_eq!(split_fixed_width("ab", &[3, 5]), vec!["ab", "", ""]);
    assert_eq!(split_fixed_width("", &[3, 5]), vec!["", "", ""]);
}

#[test]
fn test_fixed_width_exact_length_leaves_empty_remainder() {
    assert_eq!(split_fixed_width("abcdefgh", &[3, 5]), vec!["abc", "defgh", ""]);
}

#[test]
fn test_fixed_width_counts_characters() {
    let fields = split_fixed_width("αβγδε rest", &[2, 3]);
    assert_eq!(fields, vec!["αβ", "γδε", " rest"]);
}

#[test]
fn test_fixed_width_zero_widths() {
    assert_eq!(split_fixed_width("abc", &[0, 1]), vec!["", "a", "bc"]);
    assert_eq!(split_fixed_width("abc", &[]), vec!["abc"]);
}

#[test]
fn test_field_splitter_dispatch() {
    let widths = [2];
    let fixed = FieldSplitter::FixedWidth(&widths).split("ab,\"c");
    assert_eq!(fixed.fields, vec!["ab", ",\"c"]);
    assert!(!fixed.unterminated);

    let delimited = FieldSplitter::Delimited(',').split("ab,\"c");
    assert_eq!(delimited.fields, vec!["ab", "c"]);
    assert!(delimited.unterminated);
}

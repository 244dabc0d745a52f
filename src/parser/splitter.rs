//! Splitting raw catalog lines into raw field strings
//!
//! Delimited lines are split on a single character and then stitched back
//! together wherever a quoted field contained the delimiter. Fixed-width
//! lines are sliced at cumulative character offsets.

const QUOTE: char = '"';

/// Fields recovered from one delimited line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedFields {
    pub fields: Vec<String>,
    /// A quoted run reached the end of the line without a closing quote
    pub unterminated: bool,
}

/// How a line is cut into fields
#[derive(Debug, Clone, Copy)]
pub enum FieldSplitter<'a> {
    Delimited(char),
    FixedWidth(&'a [usize]),
}

impl FieldSplitter<'_> {
    /// Split one non-empty, non-comment line
    pub fn split(&self, line: &str) -> QuotedFields {
        match *self {
            FieldSplitter::Delimited(delimiter) => split_delimited(line, delimiter),
            FieldSplitter::FixedWidth(widths) => QuotedFields {
                fields: split_fixed_width(line, widths),
                unterminated: false,
            },
        }
    }
}

/// Split on `delimiter`, then rejoin quoted runs
pub fn split_delimited(line: &str, delimiter: char) -> QuotedFields {
    let tokens: Vec<&str> = line.split(delimiter).collect();
    combine_quote_parts(&tokens, delimiter)
}

/// Rejoin tokens that were split inside a quoted field.
///
/// A token containing a quote opens a run. Tokens are appended (quotes
/// removed, rejoined with `delimiter`) until one ends with a quote, which
/// closes the run. A token that both opens and ends with a quote is a
/// complete field on its own. If the tokens run out first the run is kept as
/// far as it got and the result is flagged `unterminated`.
pub fn combine_quote_parts(tokens: &[&str], delimiter: char) -> QuotedFields {
    let mut fields = Vec::with_capacity(tokens.len());
    let mut unterminated = false;
    let mut iter = tokens.iter();

    while let Some(&token) = iter.next() {
        if !token.contains(QUOTE) {
            fields.push(token.to_string());
            continue;
        }

        let mut combined = String::new();
        let mut current = token;
        loop {
            combined.extend(current.chars().filter(|&c| c != QUOTE));
            if current.ends_with(QUOTE) {
                break;
            }
            match iter.next() {
                Some(&next) => {
                    combined.push(delimiter);
                    current = next;
                }
                None => {
                    unterminated = true;
                    break;
                }
            }
        }
        fields.push(combined);
    }

    QuotedFields {
        fields,
        unterminated,
    }
}

/// Slice `line` into `widths.len() + 1` fields.
///
/// Widths count characters, not bytes. Slices are clipped at the end of the
/// line, so a short line yields empty trailing fields. The last field is
/// whatever follows the final offset.
pub fn split_fixed_width(line: &str, widths: &[usize]) -> Vec<String> {
    let mut fields = Vec::with_capacity(widths.len() + 1);
    let mut rest = line;

    for &width in widths {
        let cut = rest
            .char_indices()
            .nth(width)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let (field, remainder) = rest.split_at(cut);
        fields.push(field.to_string());
        rest = remainder;
    }
    fields.push(rest.to_string());

    fields
}

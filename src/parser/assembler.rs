//! Row assembly: the read loop shared by both splitting modes
//!
//! Lines are pulled from the source until one splits into exactly as many
//! fields as there are columns. Comment lines and lines with the wrong field
//! count are skipped, as are blank lines in delimited mode. A blank
//! fixed-width line slices into empty fields like any other short line. A row
//! is only returned once every field has been converted; if the source runs
//! dry first the dummy row is returned.

use super::converter::{convert, dummy_value};
use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::splitter::FieldSplitter;
use super::stats::ParseStats;
use crate::line_source::LineSource;
use crate::models::{ColumnSpec, Row};

/// Outcome of scanning the source for a row
enum ScanOutcome {
    Found(Row),
    Exhausted,
}

/// Borrowed view of everything one read needs
pub struct RowAssembler<'a, S, D> {
    pub source: &'a mut S,
    pub sink: &'a mut D,
    pub stats: &'a mut ParseStats,
    pub columns: &'a [ColumnSpec],
    pub comment_char: char,
}

impl<S: LineSource, D: DiagnosticSink> RowAssembler<'_, S, D> {
    /// Scan for the next structurally valid line and build its row
    pub fn next_row(&mut self, splitter: FieldSplitter<'_>) -> Row {
        match self.scan(splitter) {
            ScanOutcome::Found(row) => {
                self.stats.rows_parsed += 1;
                row
            }
            ScanOutcome::Exhausted => {
                self.stats.dummy_rows += 1;
                dummy_row(self.columns)
            }
        }
    }

    fn scan(&mut self, splitter: FieldSplitter<'_>) -> ScanOutcome {
        while let Some(line) = self.source.read_line() {
            self.stats.lines_read += 1;
            let line_number = self.source.line_number();

            if line.starts_with(self.comment_char) {
                self.stats.comment_lines += 1;
                continue;
            }
            if line.is_empty() && matches!(splitter, FieldSplitter::Delimited(_)) {
                self.stats.blank_lines += 1;
                continue;
            }

            let split = splitter.split(&line);
            if split.unterminated {
                self.sink.report(Diagnostic::UnterminatedQuote {
                    line_number,
                    line: line.clone(),
                });
            }

            if split.fields.len() != self.columns.len() {
                self.stats.field_count_mismatches += 1;
                self.sink.report(Diagnostic::FieldCountMismatch {
                    line_number,
                    expected: self.columns.len(),
                    found: split.fields.len(),
                    line,
                });
                continue;
            }

            return ScanOutcome::Found(self.build_row(&split.fields, line_number));
        }

        ScanOutcome::Exhausted
    }

    /// Convert every field; conversion failures keep the fallback value
    fn build_row(&mut self, fields: &[String], line_number: u64) -> Row {
        let mut row = Row::default();

        for (column, raw) in self.columns.iter().zip(fields) {
            let (value, ok) = convert(raw, column.data_type);
            if !ok {
                self.stats.conversion_failures += 1;
                self.sink.report(Diagnostic::ConversionFailed {
                    line_number,
                    column: column.name.clone(),
                    data_type: column.data_type,
                    raw: raw.clone(),
                });
                row.conversion_failures.push(column.name.clone());
            } else {
                // a later duplicate column replaces an earlier failed value
                row.conversion_failures.retain(|name| name != &column.name);
            }
            row.values.insert(column.name.clone(), value);
        }

        row
    }
}

/// Placeholder row: "Null" for strings, zero for numbers, skip columns absent
pub fn dummy_row(columns: &[ColumnSpec]) -> Row {
    let values = columns
        .iter()
        .filter_map(|c| dummy_value(c.data_type).map(|v| (c.name.clone(), v)))
        .collect();

    Row {
        values,
        conversion_failures: Vec::new(),
        is_dummy: true,
    }
}

//! Parsing statistics for a catalog read
//!
//! Counters accumulate over the lifetime of a parser, across every call to
//! `read_next_row`.

use serde::{Deserialize, Serialize};

/// Running counts of what the parser has seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines pulled from the line source
    pub lines_read: usize,

    /// Lines skipped because they start with the comment character
    pub comment_lines: usize,

    /// Empty lines skipped in delimited mode
    pub blank_lines: usize,

    /// Lines discarded for splitting into the wrong number of fields
    pub field_count_mismatches: usize,

    /// Individual fields that fell back to their default value
    pub conversion_failures: usize,

    /// Rows successfully assembled from input
    pub rows_parsed: usize,

    /// Placeholder rows handed out
    pub dummy_rows: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that were candidates for a row (not comments or blanks)
    pub fn data_lines(&self) -> usize {
        self.lines_read
            .saturating_sub(self.comment_lines)
            .saturating_sub(self.blank_lines)
    }

    /// Calculate success rate as a percentage of data lines
    pub fn success_rate(&self) -> f64 {
        let data_lines = self.data_lines();
        if data_lines == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / data_lines as f64) * 100.0
        }
    }
}

//! Typed row reader for catalog text files
//!
//! Catalogs come either as delimiter-separated lines (with `"`-quoted fields
//! that may contain the delimiter) or as fixed-width columns. The caller
//! supplies the ordered column names and types; the parser turns each good
//! line into a [`Row`](crate::models::Row).
//!
//! ## Architecture
//!
//! - [`splitter`] - Cutting lines into raw fields, including quote reassembly
//! - [`converter`] - Raw text to typed values with fallbacks
//! - [`assembler`] - The read loop and the dummy row
//! - [`diagnostics`] - Where skipped lines and failed conversions are reported
//! - [`stats`] - Counters for a parser's lifetime
//!
//! ## Usage
//!
//! ```no_run
//! use catalog_parser::models::{ColumnSpec, DataType};
//! use catalog_parser::parser::CatalogParser;
//!
//! let columns = vec![
//!     ColumnSpec::new("ID", DataType::Int),
//!     ColumnSpec::new("Name", DataType::String),
//!     ColumnSpec::new("Mag", DataType::Float),
//! ];
//! let mut parser = CatalogParser::delimited("ngcic.dat", '#', columns, ',');
//!
//! while parser.has_next_row() {
//!     let row = parser.read_next_row();
//!     if !row.is_dummy {
//!         println!("{:?}", row.get_str("Name"));
//!     }
//! }
//! ```

pub mod assembler;
pub mod converter;
pub mod diagnostics;
pub mod splitter;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use stats::ParseStats;

use self::assembler::{RowAssembler, dummy_row};
use self::splitter::FieldSplitter;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::line_source::{FileLineSource, LineSource};
use crate::models::{ColumnSpec, Row};
use std::path::{Path, PathBuf};

/// How lines are cut into fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMode {
    Delimited { delimiter: char },
    /// One width per column except the last, which takes the remainder
    FixedWidth { widths: Vec<usize> },
}

/// Read strategy chosen once at construction
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReadStrategy {
    Delimited { delimiter: char },
    FixedWidth { widths: Vec<usize> },
    /// The source never opened
    AlwaysDummy,
}

/// Catalog parser bound to one line source for its whole lifetime
pub struct CatalogParser<S: LineSource = FileLineSource, D: DiagnosticSink = TracingSink> {
    path: PathBuf,
    comment_char: char,
    columns: Vec<ColumnSpec>,
    strategy: ReadStrategy,
    source: S,
    sink: D,
    stats: ParseStats,
}

impl CatalogParser {
    /// Parser over a delimiter-separated file
    pub fn delimited(
        path: impl AsRef<Path>,
        comment_char: char,
        columns: Vec<ColumnSpec>,
        delimiter: char,
    ) -> Self {
        Self::with_parts(
            FileLineSource::new(),
            TracingSink,
            path,
            comment_char,
            columns,
            ParseMode::Delimited { delimiter },
        )
    }

    /// Parser over a fixed-width file
    pub fn fixed_width(
        path: impl AsRef<Path>,
        comment_char: char,
        columns: Vec<ColumnSpec>,
        widths: Vec<usize>,
    ) -> Self {
        Self::with_parts(
            FileLineSource::new(),
            TracingSink,
            path,
            comment_char,
            columns,
            ParseMode::FixedWidth { widths },
        )
    }

    /// Build a parser from validated configuration, enabling progress if asked
    pub fn from_config(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Self> {
        config.validate()?;

        let mut parser = Self::with_parts(
            FileLineSource::new(),
            TracingSink,
            path,
            config.comment_char,
            config.columns.clone(),
            config.mode()?,
        );

        if config.progress.enabled {
            parser.set_progress(
                &config.progress.message,
                config.progress.total_lines,
                config.progress.step_size,
            );
        }

        Ok(parser)
    }
}

impl<S: LineSource, D: DiagnosticSink> CatalogParser<S, D> {
    /// Open `path` through `source`. If that fails the parser is permanently
    /// stuck producing dummy rows.
    pub fn with_parts(
        mut source: S,
        mut sink: D,
        path: impl AsRef<Path>,
        comment_char: char,
        columns: Vec<ColumnSpec>,
        mode: ParseMode,
    ) -> Self {
        let path = path.as_ref().to_path_buf();

        let strategy = match source.open(&path) {
            Ok(()) => {
                sink.report(Diagnostic::Opened { path: path.clone() });
                match mode {
                    ParseMode::Delimited { delimiter } => ReadStrategy::Delimited { delimiter },
                    ParseMode::FixedWidth { widths } => ReadStrategy::FixedWidth { widths },
                }
            }
            Err(e) => {
                sink.report(Diagnostic::OpenFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                ReadStrategy::AlwaysDummy
            }
        };

        Self {
            path,
            comment_char,
            columns,
            strategy,
            source,
            sink,
            stats: ParseStats::new(),
        }
    }

    /// Read the next good row, or the dummy row if there is none.
    ///
    /// Never fails. Comment lines, lines with the wrong field count and, in
    /// delimited mode, blank lines are consumed and skipped along the way.
    pub fn read_next_row(&mut self) -> Row {
        let splitter = match &self.strategy {
            ReadStrategy::AlwaysDummy => return self.dummy(),
            ReadStrategy::Delimited { delimiter } => FieldSplitter::Delimited(*delimiter),
            ReadStrategy::FixedWidth { widths } => {
                if widths.len() + 1 != self.columns.len() {
                    self.sink.report(Diagnostic::WidthMismatch {
                        columns: self.columns.len(),
                        widths: widths.len(),
                    });
                    return self.dummy();
                }
                FieldSplitter::FixedWidth(widths)
            }
        };

        RowAssembler {
            source: &mut self.source,
            sink: &mut self.sink,
            stats: &mut self.stats,
            columns: &self.columns,
            comment_char: self.comment_char,
        }
        .next_row(splitter)
    }

    /// True while the line source has unread lines
    pub fn has_next_row(&self) -> bool {
        self.source.has_more_lines()
    }

    /// Enable progress reporting on the line source
    pub fn set_progress(&mut self, message: &str, total_lines: u64, step_size: u64) {
        self.source.set_progress(message, total_lines, step_size);
    }

    /// Advance the progress display to the current line
    pub fn show_progress(&mut self) {
        self.source.show_progress();
    }

    /// True if every read will return the dummy row regardless of input
    pub fn is_dummy_only(&self) -> bool {
        match &self.strategy {
            ReadStrategy::AlwaysDummy => true,
            ReadStrategy::FixedWidth { widths } => widths.len() + 1 != self.columns.len(),
            ReadStrategy::Delimited { .. } => false,
        }
    }

    /// Catalog path this parser was opened on
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column layout every row is built against
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Counters accumulated over all reads so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Diagnostic sink, e.g. to inspect a `CollectingSink`
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Underlying line source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn dummy(&mut self) -> Row {
        self.stats.dummy_rows += 1;
        dummy_row(&self.columns)
    }
}

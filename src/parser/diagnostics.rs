//! Diagnostics emitted while reading a catalog
//!
//! The parser never fails a read; every problem it works around is handed
//! to a [`DiagnosticSink`] instead. [`TracingSink`] forwards to `tracing`,
//! [`CollectingSink`] keeps the entries for callers that want to inspect them.

use crate::models::DataType;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A single problem (or notable event) encountered by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The line source opened successfully
    Opened { path: PathBuf },

    /// The line source could not be opened; the parser only produces dummy rows
    OpenFailed { path: PathBuf, reason: String },

    /// A line split into the wrong number of fields and was discarded
    FieldCountMismatch {
        line_number: u64,
        expected: usize,
        found: usize,
        line: String,
    },

    /// A field did not parse as its declared type and holds the fallback value
    ConversionFailed {
        line_number: u64,
        column: String,
        data_type: DataType,
        raw: String,
    },

    /// A quoted field was still open when the line ran out of tokens
    UnterminatedQuote { line_number: u64, line: String },

    /// Width list length does not match the column count
    WidthMismatch { columns: usize, widths: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Opened { path } => write!(f, "File opened: {}", path.display()),
            Diagnostic::OpenFailed { path, reason } => {
                write!(f, "Unable to open file {}: {}", path.display(), reason)
            }
            Diagnostic::FieldCountMismatch {
                line_number,
                expected,
                found,
                line,
            } => write!(
                f,
                "Line {}: expected {} fields, found {} ({})",
                line_number, expected, found, line
            ),
            Diagnostic::ConversionFailed {
                line_number,
                column,
                data_type,
                raw,
            } => write!(
                f,
                "Line {}: field '{}' = '{}' is not a valid {}",
                line_number, column, raw, data_type
            ),
            Diagnostic::UnterminatedQuote { line_number, line } => {
                write!(f, "Line {}: unterminated quote ({})", line_number, line)
            }
            Diagnostic::WidthMismatch { columns, widths } => write!(
                f,
                "Unequal fields and widths: {} columns need {} widths, got {}",
                columns,
                columns.saturating_sub(1),
                widths
            ),
        }
    }
}

/// Receiver for parser diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Default sink: logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::Opened { .. } => info!("{}", diagnostic),
            Diagnostic::OpenFailed { .. } | Diagnostic::WidthMismatch { .. } => {
                warn!("{}", diagnostic)
            }
            Diagnostic::FieldCountMismatch { .. }
            | Diagnostic::ConversionFailed { .. }
            | Diagnostic::UnterminatedQuote { .. } => debug!("{}", diagnostic),
        }
    }
}

/// Sink that stores every diagnostic in arrival order
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    entries: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn conversion_failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::ConversionFailed { .. }))
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

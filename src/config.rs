//! Parser configuration and validation.
//!
//! Bundles everything needed to construct a [`CatalogParser`](crate::parser::CatalogParser)
//! from outside the library: comment marker, splitting mode, column list
//! and progress reporting.

use crate::error::{CatalogError, Result};
use crate::models::ColumnSpec;
use crate::parser::ParseMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Progress reporting settings forwarded to the line source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub enabled: bool,

    /// Label shown next to the progress bar
    pub message: String,

    /// Expected line count, used as the bar length
    pub total_lines: u64,

    /// Redraw every this many lines
    pub step_size: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            message: "Loading catalog".to_string(),
            total_lines: 0,
            step_size: 100,
        }
    }
}

/// Configuration for one catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Lines starting with this character are skipped
    pub comment_char: char,

    /// Field delimiter; set for delimited catalogs
    pub delimiter: Option<char>,

    /// Column widths; set for fixed-width catalogs
    pub widths: Option<Vec<usize>>,

    /// Ordered column names and types
    pub columns: Vec<ColumnSpec>,

    pub progress: ProgressConfig,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_char: '#',
            delimiter: Some(','),
            widths: None,
            columns: Vec::new(),
            progress: ProgressConfig::default(),
        }
    }
}

impl ParserConfig {
    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_comment_char(mut self, comment_char: char) -> Self {
        self.comment_char = comment_char;
        self
    }

    /// Switch to delimited mode
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self.widths = None;
        self
    }

    /// Switch to fixed-width mode
    pub fn with_widths(mut self, widths: Vec<usize>) -> Self {
        self.widths = Some(widths);
        self.delimiter = None;
        self
    }

    pub fn with_progress(mut self, message: impl Into<String>, total_lines: u64, step_size: u64) -> Self {
        self.progress = ProgressConfig {
            enabled: true,
            message: message.into(),
            total_lines,
            step_size,
        };
        self
    }

    /// Check the configuration can drive a parser that reads real rows
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(CatalogError::configuration("at least one column is required"));
        }

        match (&self.delimiter, &self.widths) {
            (Some(_), Some(_)) => {
                return Err(CatalogError::configuration(
                    "delimiter and widths are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(CatalogError::configuration(
                    "either a delimiter or a width list is required",
                ));
            }
            (Some('"'), None) => {
                return Err(CatalogError::configuration(
                    "the quote character cannot be used as a delimiter",
                ));
            }
            (None, Some(widths)) if widths.len() + 1 != self.columns.len() => {
                return Err(CatalogError::configuration(format!(
                    "{} columns need {} widths, got {}",
                    self.columns.len(),
                    self.columns.len() - 1,
                    widths.len()
                )));
            }
            _ => {}
        }

        if self.progress.enabled && self.progress.step_size == 0 {
            return Err(CatalogError::configuration("progress step size must be positive"));
        }

        debug!(
            "Validated parser configuration: {} columns, comment '{}'",
            self.columns.len(),
            self.comment_char
        );
        Ok(())
    }

    /// Splitting mode described by this configuration
    pub fn mode(&self) -> Result<ParseMode> {
        match (&self.delimiter, &self.widths) {
            (Some(delimiter), None) => Ok(ParseMode::Delimited {
                delimiter: *delimiter,
            }),
            (None, Some(widths)) => Ok(ParseMode::FixedWidth {
                widths: widths.clone(),
            }),
            _ => Err(CatalogError::configuration(
                "exactly one of delimiter or widths must be set",
            )),
        }
    }
}

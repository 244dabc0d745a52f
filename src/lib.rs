//! Catalog Parser Library
//!
//! Reads astronomical catalog text files into typed rows. Catalogs are
//! either delimiter-separated (with quoted fields that may contain the
//! delimiter) or fixed-width, and the caller supplies the ordered column
//! names and types.
//!
//! This library provides:
//! - A line-source abstraction with file and in-memory implementations
//! - Quote-aware delimited splitting and fixed-width slicing
//! - Typed field conversion with per-type fallback values
//! - A row reader that never fails, degrading to placeholder rows instead
//! - Pluggable diagnostics and running parse statistics

pub mod cli;
pub mod config;
pub mod error;
pub mod line_source;
pub mod models;
pub mod parser;

pub use config::ParserConfig;
pub use error::{CatalogError, Result};
pub use line_source::{FileLineSource, LineSource, MemoryLineSource};
pub use models::{ColumnSpec, DataType, Row, Value};
pub use parser::{CatalogParser, ParseMode};

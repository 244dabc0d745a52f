//! Test utilities for catalog parser testing
//!
//! Builders for column lists and parsers over in-memory catalogs, shared by
//! the test modules below.

use crate::line_source::MemoryLineSource;
use crate::models::{ColumnSpec, DataType};
use crate::parser::{CatalogParser, CollectingSink, ParseMode};
use std::io::Write;
use tempfile::NamedTempFile;

mod facade_tests;
mod splitter_tests;

/// Columns of a small NGC/IC-style catalog
pub fn ngc_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("ID", DataType::Int),
        ColumnSpec::new("Name", DataType::String),
        ColumnSpec::new("RA", DataType::Double),
        ColumnSpec::new("Mag", DataType::Float),
    ]
}

/// Delimited catalog content with comments, a blank line and a broken row
pub fn create_test_catalog() -> String {
    r#"# NGC/IC test catalog
# ID,Name,RA,Mag
224,"Andromeda Galaxy, M31",0.712,3.44

1976,Orion Nebula,5.588
1952,Crab Nebula,5.575,8.4
"#
    .to_string()
}

/// Parser over in-memory text with a collecting sink
pub fn memory_parser(
    text: &str,
    columns: Vec<ColumnSpec>,
    mode: ParseMode,
) -> CatalogParser<MemoryLineSource, CollectingSink> {
    CatalogParser::with_parts(
        MemoryLineSource::from_text(text),
        CollectingSink::new(),
        "memory",
        '#',
        columns,
        mode,
    )
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

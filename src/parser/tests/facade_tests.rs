//! Tests for parser construction, strategy selection and progress forwarding

use super::*;
use crate::config::ParserConfig;
use crate::line_source::{FileLineSource, LineSource};
use crate::parser::Diagnostic;
use crate::parser::assembler::dummy_row;

#[test]
fn test_missing_file_degrades_to_dummy_rows() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let missing = temp_dir.path().join("ngcic.dat");

    let mut parser = CatalogParser::with_parts(
        FileLineSource::new(),
        CollectingSink::new(),
        &missing,
        '#',
        ngc_columns(),
        ParseMode::Delimited { delimiter: ',' },
    );

    assert!(parser.is_dummy_only());
    assert!(!parser.has_next_row());
    for _ in 0..3 {
        assert_eq!(parser.read_next_row(), dummy_row(&ngc_columns()));
    }
    assert_eq!(parser.stats().dummy_rows, 3);
    assert_eq!(parser.stats().lines_read, 0);

    // reported once, at construction
    assert_eq!(parser.sink().entries().len(), 1);
    assert!(matches!(
        &parser.sink().entries()[0],
        Diagnostic::OpenFailed { path, .. } if path == &missing
    ));
}

#[test]
fn test_width_mismatch_never_touches_source() {
    let mut parser = memory_parser(
        "abcdefgh12\nabcdefgh12\n",
        ngc_columns(),
        ParseMode::FixedWidth { widths: vec![3, 5] },
    );

    assert!(parser.is_dummy_only());
    for _ in 0..2 {
        let row = parser.read_next_row();
        assert!(row.is_dummy);
        assert_eq!(row, dummy_row(&ngc_columns()));
    }

    assert_eq!(parser.source().line_number(), 0);
    assert!(parser.has_next_row());
    assert_eq!(parser.stats().lines_read, 0);

    let width_reports = parser
        .sink()
        .entries()
        .iter()
        .filter(|d| matches!(d, Diagnostic::WidthMismatch { columns: 4, widths: 2 }))
        .count();
    assert_eq!(width_reports, 2);
}

#[test]
fn test_has_next_row_is_idempotent() {
    let mut parser = memory_parser(
        "1,A,1.0,1.0\n2,B,2.0,2.0",
        ngc_columns(),
        ParseMode::Delimited { delimiter: ',' },
    );

    for _ in 0..10 {
        assert!(parser.has_next_row());
    }
    assert_eq!(parser.source().line_number(), 0);
    assert_eq!(parser.read_next_row().get_i32("ID"), Some(1));

    for _ in 0..10 {
        assert!(parser.has_next_row());
    }
    assert_eq!(parser.read_next_row().get_i32("ID"), Some(2));
    assert!(!parser.has_next_row());
}

#[test]
fn test_opened_file_parses_rows() {
    let temp_file = create_temp_file(&create_test_catalog());

    let mut parser = CatalogParser::delimited(temp_file.path(), '#', ngc_columns(), ',');
    assert!(!parser.is_dummy_only());
    assert_eq!(parser.path(), temp_file.path());

    let mut names = Vec::new();
    while parser.has_next_row() {
        let row = parser.read_next_row();
        if !row.is_dummy {
            names.push(row.get_str("Name").unwrap_or_default().to_string());
        }
    }

    assert_eq!(names, vec!["Andromeda Galaxy, M31", "Crab Nebula"]);
    assert_eq!(parser.stats().dummy_rows, 0);
}

#[test]
fn test_fixed_width_file() {
    let temp_file = create_temp_file("# fixed\nabcdefgh12\n");
    let columns = vec![
        ColumnSpec::new("A", DataType::String),
        ColumnSpec::new("B", DataType::String),
        ColumnSpec::new("C", DataType::Int),
    ];

    let mut parser = CatalogParser::fixed_width(temp_file.path(), '#', columns, vec![3, 5]);
    let row = parser.read_next_row();
    assert_eq!(row.get_str("A"), Some("abc"));
    assert_eq!(row.get_str("B"), Some("defgh"));
    assert_eq!(row.get_i32("C"), Some(12));
    assert!(!parser.has_next_row());
}

#[test]
fn test_from_config_with_progress() {
    let content: String = (0..25).map(|i| format!("{},Star {},1.0,2.0\n", i, i)).collect();
    let temp_file = create_temp_file(&content);

    let config = ParserConfig::default()
        .with_columns(ngc_columns())
        .with_delimiter(',')
        .with_progress("Loading test stars", 25, 10);

    let mut parser = CatalogParser::from_config(temp_file.path(), &config).unwrap();
    let mut rows = 0;
    while parser.has_next_row() {
        if !parser.read_next_row().is_dummy {
            rows += 1;
        }
        parser.show_progress();
    }

    assert_eq!(rows, 25);
    assert_eq!(parser.source().line_number(), 25);
}

#[test]
fn test_from_config_rejects_invalid_config() {
    let config = ParserConfig::default().with_widths(vec![3]);
    assert!(CatalogParser::from_config("unused.dat", &config).is_err());
}

#[test]
fn test_progress_forwarded_to_memory_source() {
    let mut parser = memory_parser(
        "1,A,1.0,1.0",
        ngc_columns(),
        ParseMode::Delimited { delimiter: ',' },
    );
    parser.set_progress("Loading", 1, 1);
    parser.read_next_row();
    parser.show_progress();
    assert_eq!(parser.source().line_number(), 1);
}

//! Command-line interface components.

use crate::config::ParserConfig;
use crate::models::{ColumnSpec, DataType, parse_widths};
use crate::parser::{CatalogParser, ParseStats};
use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "catalog_parser")]
#[command(about = "Read delimited or fixed-width catalog files into typed rows")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Catalog file to read
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Ordered column list as name:type pairs (types: string, double, int, float, skip)
    #[arg(short, long)]
    pub columns: String,

    /// Field delimiter for delimited catalogs, default "," ("\t" or "tab" for tabs)
    #[arg(short, long, conflicts_with = "widths")]
    pub delimiter: Option<String>,

    /// Comma-separated column widths for fixed-width catalogs (one fewer than columns)
    #[arg(short, long)]
    pub widths: Option<String>,

    /// Comment character; lines starting with it are skipped
    #[arg(long, default_value = "#")]
    pub comment: String,

    /// Stop after printing this many rows
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Show a progress bar while reading
    #[arg(long)]
    pub progress: bool,

    /// Expected line count for the progress bar (counted from the file if omitted)
    #[arg(long)]
    pub total_lines: Option<u64>,

    /// Progress bar redraw interval in lines
    #[arg(long, default_value_t = 100)]
    pub step: u64,

    /// Label shown next to the progress bar
    #[arg(long, default_value = "Loading catalog")]
    pub message: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the parser configuration described by these arguments
    pub fn to_config(&self) -> Result<ParserConfig> {
        let columns = ColumnSpec::parse_list(&self.columns)?;
        let comment_char = parse_char(&self.comment).context("Invalid --comment")?;

        let mut config = ParserConfig::default()
            .with_columns(columns)
            .with_comment_char(comment_char);

        config = match (&self.delimiter, &self.widths) {
            (_, Some(widths)) => config.with_widths(parse_widths(widths)?),
            (Some(delimiter), None) => {
                config.with_delimiter(parse_char(delimiter).context("Invalid --delimiter")?)
            }
            (None, None) => config,
        };

        if self.progress {
            let total_lines = match self.total_lines {
                Some(total) => total,
                None => count_lines(&self.input)?,
            };
            config = config.with_progress(&self.message, total_lines, self.step);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a single-character option, accepting `\t` and `tab` for a tab
pub fn parse_char(value: &str) -> Result<char> {
    if matches!(value, "\\t" | "tab") {
        return Ok('\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("expected a single character, got '{}'", value),
    }
}

fn count_lines(path: &Path) -> Result<u64> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut count = 0;
    for line in BufReader::new(file).lines() {
        line.with_context(|| format!("Failed to read {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("catalog_parser={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Read the catalog and print its rows tab-separated to stdout
pub fn run(args: &Args) -> Result<ParseStats> {
    let config = args.to_config()?;
    debug!("Parser configuration: {:?}", config);

    let mut parser = CatalogParser::from_config(&args.input, &config)?;
    if parser.is_dummy_only() {
        bail!("Unable to read catalog {}", args.input.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let header: Vec<&str> = parser
        .columns()
        .iter()
        .filter(|c| c.data_type != DataType::Skip)
        .map(|c| c.name.as_str())
        .collect();
    writeln!(out, "{}", header.join("\t"))?;

    let mut printed = 0;
    while parser.has_next_row() {
        if args.limit.is_some_and(|limit| printed >= limit) {
            break;
        }

        let row = parser.read_next_row();
        parser.show_progress();

        // trailing comments or bad lines leave only the placeholder
        if row.is_dummy {
            continue;
        }

        writeln!(out, "{}", row.to_delimited(parser.columns(), "\t"))?;
        printed += 1;
    }
    out.flush()?;

    let stats = parser.stats().clone();
    print_summary(&stats);
    Ok(stats)
}

fn print_summary(stats: &ParseStats) {
    eprintln!();
    eprintln!("{}", "Catalog summary".bright_green().bold());
    eprintln!("  {} {}", "Lines read:".bright_white(), stats.lines_read);
    eprintln!("  {} {}", "Rows parsed:".bright_white(), stats.rows_parsed);
    eprintln!(
        "  {} {} comment, {} blank, {} malformed",
        "Skipped:".bright_white(),
        stats.comment_lines,
        stats.blank_lines,
        stats.field_count_mismatches
    );

    let failures = format!("{}", stats.conversion_failures);
    eprintln!(
        "  {} {}",
        "Conversion failures:".bright_white(),
        if stats.conversion_failures > 0 {
            failures.bright_yellow()
        } else {
            failures.normal()
        }
    );
    eprintln!(
        "  {} {:.1}%",
        "Success rate:".bright_white(),
        stats.success_rate()
    );
}

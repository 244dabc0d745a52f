//! Sequential line providers consumed by the catalog parser.
//!
//! A [`LineSource`] hands out raw text lines one at a time and answers
//! whether more remain without consuming anything. The file-backed source
//! keeps a single line of lookahead for that; the in-memory source is used
//! for strings already loaded by the caller.

use crate::error::{CatalogError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Provider of raw catalog lines
pub trait LineSource {
    /// Prepare the source for reading `path`
    fn open(&mut self, path: &Path) -> Result<()>;

    /// True while at least one more line can be read. Must not consume input.
    fn has_more_lines(&self) -> bool;

    /// Next line without its terminator, or `None` once exhausted
    fn read_line(&mut self) -> Option<String>;

    /// Number of lines handed out so far
    fn line_number(&self) -> u64;

    fn set_progress(&mut self, message: &str, total_lines: u64, step_size: u64);

    /// Report progress; sources only redraw on step boundaries
    fn show_progress(&mut self);
}

/// Progress bar state shared by the file source
struct ProgressState {
    bar: ProgressBar,
    step_size: u64,
}

impl ProgressState {
    fn new(message: &str, total_lines: u64, step_size: u64) -> Self {
        let bar = ProgressBar::new(total_lines);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(message.to_string());

        Self {
            bar,
            step_size: step_size.max(1),
        }
    }
}

/// Buffered reader over a catalog file on disk
pub struct FileLineSource {
    path: Option<PathBuf>,
    reader: Option<BufReader<File>>,
    next_line: Option<String>,
    line_number: u64,
    progress: Option<ProgressState>,
}

impl Default for FileLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLineSource {
    pub fn new() -> Self {
        Self {
            path: None,
            reader: None,
            next_line: None,
            line_number: 0,
            progress: None,
        }
    }

    /// Path of the currently open file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Pull the next line from the reader into the lookahead slot
    fn fetch_next(&mut self) {
        let Some(reader) = self.reader.as_mut() else {
            self.next_line = None;
            return;
        };

        let mut buffer = Vec::new();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => {
                self.next_line = None;
                self.reader = None;
            }
            Ok(_) => {
                while matches!(buffer.last(), Some(b'\n' | b'\r')) {
                    buffer.pop();
                }
                // Latin-1 names are common in older catalogs; keep reading past them
                self.next_line = Some(String::from_utf8_lossy(&buffer).into_owned());
            }
            Err(e) => {
                warn!(
                    "Stopped reading {} after line {}: {}",
                    self.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    self.line_number,
                    e
                );
                self.next_line = None;
                self.reader = None;
            }
        }
    }
}

impl LineSource for FileLineSource {
    fn open(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => CatalogError::io(path, e),
        })?;

        self.path = Some(path.to_path_buf());
        self.reader = Some(BufReader::new(file));
        self.line_number = 0;
        self.fetch_next();

        debug!("Opened line source: {}", path.display());
        Ok(())
    }

    fn has_more_lines(&self) -> bool {
        self.next_line.is_some()
    }

    fn read_line(&mut self) -> Option<String> {
        let line = self.next_line.take()?;
        self.line_number += 1;
        self.fetch_next();

        if self.next_line.is_none() {
            if let Some(progress) = &self.progress {
                progress.bar.finish_with_message("Done");
            }
        }

        Some(line)
    }

    fn line_number(&self) -> u64 {
        self.line_number
    }

    fn set_progress(&mut self, message: &str, total_lines: u64, step_size: u64) {
        debug!(
            "Progress enabled: '{}' over {} lines, step {}",
            message, total_lines, step_size
        );
        self.progress = Some(ProgressState::new(message, total_lines, step_size));
    }

    fn show_progress(&mut self) {
        if let Some(progress) = &self.progress {
            if self.line_number % progress.step_size == 0 {
                progress.bar.set_position(self.line_number);
            }
        }
    }
}

/// Line source over text already held in memory
#[derive(Debug, Default)]
pub struct MemoryLineSource {
    lines: VecDeque<String>,
    line_number: u64,
    total_lines: u64,
    step_size: u64,
    message: String,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Split `text` on line breaks, dropping `\r` from CRLF endings
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl LineSource for MemoryLineSource {
    fn open(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn has_more_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    fn read_line(&mut self) -> Option<String> {
        let line = self.lines.pop_front()?;
        self.line_number += 1;
        Some(line)
    }

    fn line_number(&self) -> u64 {
        self.line_number
    }

    fn set_progress(&mut self, message: &str, total_lines: u64, step_size: u64) {
        self.message = message.to_string();
        self.total_lines = total_lines;
        self.step_size = step_size.max(1);
    }

    fn show_progress(&mut self) {
        if self.step_size > 0 && self.line_number % self.step_size == 0 {
            debug!(
                "{}: {}/{} lines",
                self.message, self.line_number, self.total_lines
            );
        }
    }
}

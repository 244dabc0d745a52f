//! Error handling for catalog parsing operations.
//!
//! The read API never surfaces these; they are returned by the fallible
//! setup paths (opening a line source, parsing column and width lists,
//! validating configuration).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid column specification '{spec}': {reason}")]
    InvalidColumnSpec { spec: String, reason: String },

    #[error("Unknown data type: {name} (expected string, double, int, float or skip)")]
    UnknownDataType { name: String },

    #[error("Invalid width list '{spec}': {reason}")]
    InvalidWidths { spec: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CatalogError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

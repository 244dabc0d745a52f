//! Core data structures for catalog parsing.
//!
//! Defines the column types a catalog can declare, the column specification
//! supplied by callers, typed field values and the row mapping handed back
//! from every read.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Declared type of a catalog column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Double,
    Int,
    Float,
    /// Parsed but not interpreted; kept as its raw text
    Skip,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Double => "double",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Skip => "skip",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" => Ok(DataType::String),
            "double" | "f64" => Ok(DataType::Double),
            "int" | "i32" => Ok(DataType::Int),
            "float" | "f32" => Ok(DataType::Float),
            "skip" => Ok(DataType::Skip),
            other => Err(CatalogError::UnknownDataType {
                name: other.to_string(),
            }),
        }
    }
}

/// One entry of the ordered column specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Parse a comma-separated `name:type` list, e.g. `ID:int,Name:string,RA:double`
    pub fn parse_list(spec: &str) -> Result<Vec<ColumnSpec>> {
        let mut columns = Vec::new();

        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (name, type_name) =
                entry
                    .split_once(':')
                    .ok_or_else(|| CatalogError::InvalidColumnSpec {
                        spec: entry.to_string(),
                        reason: "expected name:type".to_string(),
                    })?;

            let name = name.trim();
            if name.is_empty() {
                return Err(CatalogError::InvalidColumnSpec {
                    spec: entry.to_string(),
                    reason: "column name is empty".to_string(),
                });
            }

            columns.push(ColumnSpec::new(name, type_name.parse()?));
        }

        if columns.is_empty() {
            return Err(CatalogError::InvalidColumnSpec {
                spec: spec.to_string(),
                reason: "no columns given".to_string(),
            });
        }

        Ok(columns)
    }
}

/// Parse a comma-separated width list, e.g. `3,5,12`
pub fn parse_widths(spec: &str) -> Result<Vec<usize>> {
    spec.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<usize>().map_err(|e| CatalogError::InvalidWidths {
                spec: spec.to_string(),
                reason: format!("'{}' is not a width ({})", w, e),
            })
        })
        .collect()
}

/// A single typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Double(f64),
    Int(i32),
    Float(f32),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Int(v) => Some(f64::from(*v)),
            Value::Str(_) => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Double(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One parsed record: column name to typed value
///
/// A row is built fresh on every read and moved to the caller. Besides the
/// values it records which fields fell back to their default because the
/// text did not convert, and whether it is the placeholder row returned when
/// no real row was available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub values: HashMap<String, Value>,
    pub conversion_failures: Vec<String>,
    pub is_dummy: bool,
}

impl Row {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(Value::as_i32)
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(Value::as_f32)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if the named field holds a fallback value rather than parsed text
    pub fn conversion_failed(&self, name: &str) -> bool {
        self.conversion_failures.iter().any(|n| n == name)
    }

    /// Render values in column order, leaving out skip columns
    pub fn to_delimited(&self, columns: &[ColumnSpec], separator: &str) -> String {
        columns
            .iter()
            .filter(|c| c.data_type != DataType::Skip)
            .map(|c| {
                self.values
                    .get(&c.name)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

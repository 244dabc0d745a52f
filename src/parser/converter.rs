//! Conversion of raw field text into typed values
//!
//! Numeric fields are trimmed before parsing. A field that does not parse
//! gets its type's fallback value and `ok == false`; it is never an error.

use crate::models::{DataType, Value};

pub const BROKEN_DOUBLE: f64 = 0.0;
pub const BROKEN_FLOAT: f32 = 0.0;
pub const BROKEN_INT: i32 = 0;

/// Convert `raw` to `data_type`, returning the value and whether parsing succeeded
pub fn convert(raw: &str, data_type: DataType) -> (Value, bool) {
    match data_type {
        DataType::String | DataType::Skip => (Value::Str(raw.to_string()), true),
        DataType::Double => match raw.trim().parse::<f64>() {
            Ok(v) => (Value::Double(v), true),
            Err(_) => (Value::Double(BROKEN_DOUBLE), false),
        },
        DataType::Int => match raw.trim().parse::<i32>() {
            Ok(v) => (Value::Int(v), true),
            Err(_) => (Value::Int(BROKEN_INT), false),
        },
        DataType::Float => match raw.trim().parse::<f32>() {
            Ok(v) => (Value::Float(v), true),
            Err(_) => (Value::Float(BROKEN_FLOAT), false),
        },
    }
}

/// Placeholder value used in dummy rows; skip columns have none
pub fn dummy_value(data_type: DataType) -> Option<Value> {
    match data_type {
        DataType::String => Some(Value::Str("Null".to_string())),
        DataType::Double => Some(Value::Double(BROKEN_DOUBLE)),
        DataType::Int => Some(Value::Int(BROKEN_INT)),
        DataType::Float => Some(Value::Float(BROKEN_FLOAT)),
        DataType::Skip => None,
    }
}

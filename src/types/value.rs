//! Cell definitions for data frame rows.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

/// A single cell of a data frame row.
///
/// Cells are resolved once when a document is decoded. Shapes the
/// extractor cannot turn into numbers are kept as-is so that the error
/// surfaces only when a caller actually reads that cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Cell {
    /// JSON `null`.
    Null,
    /// Scalar number.
    Number(f64),
    /// Array whose elements are all numbers (possibly empty).
    NumberArray(Vec<f64>),
    /// UTF-8 string.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Array holding at least one non-numeric element.
    Array(Vec<JsonValue>),
    /// JSON object.
    Object(serde_json::Map<String, JsonValue>),
}

impl Cell {
    /// Returns true if this cell is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract a scalar number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a numeric array.
    #[must_use]
    pub fn as_f64_slice(&self) -> Option<&[f64]> {
        match self {
            Cell::NumberArray(values) => Some(values),
            _ => None,
        }
    }

    /// Returns a short name describing the shape of this cell.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Number(_) => "float64",
            Cell::NumberArray(_) => "[]float64",
            Cell::String(_) => "string",
            Cell::Bool(_) => "bool",
            Cell::Array(_) => "[]interface",
            Cell::Object(_) => "map",
        }
    }
}

impl From<JsonValue> for Cell {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Cell::Null,
            JsonValue::Bool(b) => Cell::Bool(b),
            JsonValue::Number(n) => number_cell(n.as_f64(), &n),
            JsonValue::String(s) => Cell::String(s),
            JsonValue::Array(items) => {
                let numbers: Option<Vec<f64>> = items.iter().map(JsonValue::as_f64).collect();
                match numbers {
                    Some(numbers) => Cell::NumberArray(numbers),
                    None => Cell::Array(items),
                }
            }
            JsonValue::Object(map) => Cell::Object(map),
        }
    }
}

/// Builds a numeric cell, keeping numbers that don't fit an `f64` numeric.
fn number_cell(value: Option<f64>, raw: &dyn fmt::Display) -> Cell {
    match value {
        Some(f) => Cell::Number(f),
        None => {
            warn!(number = %raw, "number not representable as f64, storing NaN");
            Cell::Number(f64::NAN)
        }
    }
}

impl From<Cell> for JsonValue {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Null => JsonValue::Null,
            Cell::Number(n) => serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number),
            Cell::NumberArray(values) => JsonValue::Array(
                values
                    .into_iter()
                    .map(|n| {
                        serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
                    })
                    .collect(),
            ),
            Cell::String(s) => JsonValue::String(s),
            Cell::Bool(b) => JsonValue::Bool(b),
            Cell::Array(items) => JsonValue::Array(items),
            Cell::Object(map) => JsonValue::Object(map),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Vec<f64>> for Cell {
    fn from(values: Vec<f64>) -> Self {
        Cell::NumberArray(values)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_from_json_shapes() {
        assert_eq!(Cell::from(json!(null)), Cell::Null);
        assert_eq!(Cell::from(json!(1.5)), Cell::Number(1.5));
        assert_eq!(Cell::from(json!(3)), Cell::Number(3.0));
        assert_eq!(Cell::from(json!("BED5")), Cell::String("BED5".into()));
        assert_eq!(
            Cell::from(json!([-41.8, -41.1])),
            Cell::NumberArray(vec![-41.8, -41.1])
        );
        assert_eq!(Cell::from(json!(true)), Cell::Bool(true));
    }

    #[test]
    fn test_mixed_array_is_not_numeric() {
        let cell = Cell::from(json!([1.0, "x"]));
        assert!(matches!(cell, Cell::Array(_)));
        assert_eq!(cell.as_f64_slice(), None);

        let nested = Cell::from(json!([[1.0], [2.0]]));
        assert!(matches!(nested, Cell::Array(_)));
    }

    #[test]
    fn test_unrepresentable_number_stays_numeric() {
        let cell = number_cell(None, &"1e400");
        assert_eq!(cell.type_name(), "float64");
        assert!(cell.as_f64().is_some_and(f64::is_nan));
        assert_eq!(number_cell(Some(2.5), &"2.5"), Cell::Number(2.5));
    }

    #[test]
    fn test_empty_array_is_numeric() {
        assert_eq!(Cell::from(json!([])), Cell::NumberArray(vec![]));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Cell::Null.type_name(), "null");
        assert_eq!(Cell::Bool(false).type_name(), "bool");
        assert_eq!(Cell::from("a").type_name(), "string");
        assert_eq!(Cell::from(vec![1.0]).type_name(), "[]float64");
    }

    #[test]
    fn test_cell_serializes_back_to_json() {
        let cell = Cell::NumberArray(vec![1.5, 2.0]);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, json!([1.5, 2.0]));
    }
}

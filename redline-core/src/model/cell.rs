use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder written into every cell of a row marked as erroneous.
pub const SENTINEL: &str = "X";

/// A single cell of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// The sentinel cell that replaces marked rows.
    pub fn sentinel() -> Self {
        CellValue::Text(SENTINEL.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&CellValue> for serde_json::Value {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Empty => serde_json::Value::Null,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::CellValue;

/// An ordered sequence of rows over a fixed set of named columns.
///
/// Row order is stable and is the index space used for selection
/// (row 0 is the first data row after the header). Every row is
/// exactly `columns.len()` cells wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }

    /// Overwrite every cell of a row with the given value.
    ///
    /// Caller is responsible for bounds; out-of-range indices are a
    /// no-op here and rejected upstream by the annotation engine.
    pub(crate) fn overwrite_row(&mut self, index: usize, value: CellValue) {
        if let Some(row) = self.rows.get_mut(index) {
            for cell in row.iter_mut() {
                *cell = value.clone();
            }
        }
    }

    /// Render a row as a compact `{"column": value, ...}` string for
    /// display in a row list. Fields appear in table column order, not
    /// alphabetically, so the preview matches the sheet layout.
    pub fn row_preview(&self, index: usize) -> String {
        let row = match self.rows.get(index) {
            Some(r) => r,
            None => return "{}".to_string(),
        };

        let fields: Vec<String> = self
            .columns
            .iter()
            .zip(row)
            .map(|(name, cell)| {
                format!(
                    "{}:{}",
                    serde_json::Value::String(name.clone()),
                    serde_json::Value::from(cell)
                )
            })
            .collect();
        format!("{{{}}}", fields.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![CellValue::Number(1.0), CellValue::Text("x".to_string())]);
        table.push_row(vec![CellValue::Bool(true)]);
        table
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let table = sample();
        assert_eq!(table.row(1).unwrap().len(), 2);
        assert_eq!(table.row(1).unwrap()[1], CellValue::Empty);
    }

    #[test]
    fn test_cell_by_column_name() {
        let table = sample();
        assert_eq!(table.cell(0, "a"), Some(&CellValue::Number(1.0)));
        assert_eq!(table.cell(0, "missing"), None);
        assert_eq!(table.cell(5, "a"), None);
    }

    #[test]
    fn test_row_preview_is_keyed_by_column() {
        let table = sample();
        assert_eq!(table.row_preview(0), r#"{"a":1.0,"b":"x"}"#);
        assert_eq!(table.row_preview(9), "{}");
    }

    #[test]
    fn test_row_preview_preserves_column_order() {
        let mut table = Table::new(vec!["zeta".to_string(), "alpha".to_string()]);
        table.push_row(vec![CellValue::Number(1.0), CellValue::Number(2.0)]);
        assert_eq!(table.row_preview(0), r#"{"zeta":1.0,"alpha":2.0}"#);
    }
}

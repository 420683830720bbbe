//! Reading uploaded workbook bytes into tables.
//!
//! The first sheet row is treated as the header; every following row
//! becomes a data row, so selection row 0 is the first row after the
//! header.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError};

use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Enumerate the sheet names of a workbook payload.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    Ok(workbook.sheet_names().to_owned())
}

/// Parse one sheet of a workbook payload into a fresh table.
pub fn read_table(bytes: &[u8], sheet: &str) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range(sheet).map_err(|e| match e {
        XlsxError::WorksheetNotFound(name) => Error::SheetNotFound(name),
        other => Error::Input(other),
    })?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header_names(header),
        None => Vec::new(),
    };

    let mut table = Table::new(columns);
    for cells in rows {
        table.push_row(cells.iter().map(cell_value).collect());
    }
    Ok(table)
}

/// Column names from the header row. Blank headers get a positional
/// name, and duplicates are disambiguated the same way.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (i, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        };
        let name = if name.is_empty() || names.contains(&name) {
            format!("column_{}", i)
        } else {
            name
        };
        names.push(name);
    }
    names
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Data").unwrap();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 2, "name").unwrap();
        sheet.write_string(1, 0, "alpha").unwrap();
        sheet.write_number(1, 1, 10).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        sheet.write_string(2, 0, "beta").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_sheet_names() {
        let bytes = workbook_bytes();
        assert_eq!(sheet_names(&bytes).unwrap(), vec!["Data".to_string()]);
    }

    #[test]
    fn test_blank_and_duplicate_headers_get_positional_names() {
        let table = read_table(&workbook_bytes(), "Data").unwrap();
        assert_eq!(table.columns(), &["name", "column_1", "column_2"]);
    }

    #[test]
    fn test_rows_are_padded_to_header_width() {
        let table = read_table(&workbook_bytes(), "Data").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.row(0).unwrap(),
            &[
                CellValue::Text("alpha".to_string()),
                CellValue::Number(10.0),
                CellValue::Bool(true),
            ]
        );
        assert_eq!(table.row(1).unwrap()[1], CellValue::Empty);
    }

    #[test]
    fn test_missing_sheet_is_reported() {
        let err = read_table(&workbook_bytes(), "Nope").unwrap_err();
        assert!(matches!(err, Error::SheetNotFound(_)));
    }

    #[test]
    fn test_garbage_bytes_are_an_input_error() {
        let err = sheet_names(b"not a workbook").unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }
}

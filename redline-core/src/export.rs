//! Serializing a derived table back into a downloadable workbook.

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::{CellValue, Table};

/// Name of the single sheet in every exported workbook.
pub const EXPORT_SHEET_NAME: &str = "Updated_Data";

/// MIME type for the exported payload.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A serialized workbook plus its suggested download name.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Suggested download name, derived from the source file name.
/// Stateless; repeated exports get the same name.
pub fn suggested_name(source_file_name: &str) -> String {
    format!("updated_{}", source_file_name)
}

/// Serialize a table to a single-sheet workbook.
///
/// The header row comes from the column names and the table's row
/// index is not written as a column. Any encoding failure surfaces as
/// an error with no partial payload.
pub fn write_workbook(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let excel_row = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col = c as u16;
            match cell {
                CellValue::Number(n) => {
                    worksheet.write_number(excel_row, col, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(excel_row, col, *b)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;

    #[test]
    fn test_suggested_name_prefixes_source() {
        assert_eq!(suggested_name("report.xlsx"), "updated_report.xlsx");
    }

    #[test]
    fn test_export_uses_fixed_sheet_name() {
        let table = Table::new(vec!["a".to_string()]);
        let bytes = write_workbook(&table).unwrap();
        assert_eq!(
            source::sheet_names(&bytes).unwrap(),
            vec![EXPORT_SHEET_NAME.to_string()]
        );
    }

    #[test]
    fn test_round_trip_preserves_shape_and_values() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        table.push_row(vec![
            CellValue::Number(1.5),
            CellValue::Text("hello".to_string()),
            CellValue::Bool(false),
        ]);
        table.push_row(vec![
            CellValue::Text("X".to_string()),
            CellValue::Text("X".to_string()),
            CellValue::Text("X".to_string()),
        ]);
        table.push_row(vec![
            CellValue::Number(-3.0),
            CellValue::Empty,
            CellValue::Text("end".to_string()),
        ]);

        let bytes = write_workbook(&table).unwrap();
        let read_back = source::read_table(&bytes, EXPORT_SHEET_NAME).unwrap();

        assert_eq!(read_back, table);
    }
}

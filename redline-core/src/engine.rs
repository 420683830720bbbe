use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{CellValue, ErrorClass, Table};

/// Result of an annotation pass, for the user-facing summary line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplySummary {
    pub error_class: ErrorClass,
    pub count: usize,
}

impl ApplySummary {
    pub fn message(&self) -> String {
        format!(
            "Applied {} to {} row(s).",
            self.error_class.as_str(),
            self.count
        )
    }
}

/// Produce a derived table where every selected row is overwritten
/// with the sentinel marker.
///
/// The source table is untouched; unselected rows are carried over
/// value-identical, with no re-parsing or reformatting. Indices must
/// be in range for `table` - an out-of-range index means a selection
/// outlived its table and is rejected, never clamped or skipped.
pub fn apply(
    table: &Table,
    selected: &[usize],
    error_class: ErrorClass,
) -> Result<(Table, ApplySummary)> {
    for &index in selected {
        if index >= table.row_count() {
            return Err(Error::SelectionRange {
                index,
                rows: table.row_count(),
            });
        }
    }

    let mut derived = table.clone();
    for &index in selected {
        derived.overwrite_row(index, CellValue::sentinel());
    }

    let summary = ApplySummary {
        error_class,
        count: selected.len(),
    };
    Ok((derived, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    fn three_row_table() -> Table {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![number(1.0), number(2.0)]);
        table.push_row(vec![number(3.0), number(4.0)]);
        table.push_row(vec![number(5.0), number(6.0)]);
        table
    }

    #[test]
    fn test_selected_rows_become_all_sentinel() {
        let table = three_row_table();
        let (derived, summary) = apply(&table, &[1], ErrorClass::Major).unwrap();

        assert_eq!(derived.row(0), table.row(0));
        assert_eq!(derived.row(2), table.row(2));
        assert_eq!(
            derived.row(1).unwrap(),
            &[CellValue::sentinel(), CellValue::sentinel()]
        );
        assert_eq!(summary.error_class, ErrorClass::Major);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_count_matches_selection_size() {
        let table = three_row_table();
        let (_, summary) = apply(&table, &[0, 2], ErrorClass::Minor).unwrap();
        assert_eq!(summary.count, 2);

        let (derived, summary) = apply(&table, &[], ErrorClass::Minor).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(derived, table);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let table = three_row_table();
        let err = apply(&table, &[5], ErrorClass::Major).unwrap_err();
        match err {
            Error::SelectionRange { index, rows } => {
                assert_eq!(index, 5);
                assert_eq!(rows, 3);
            }
            other => panic!("expected SelectionRange, got {:?}", other),
        }
    }

    #[test]
    fn test_source_table_is_untouched() {
        let table = three_row_table();
        let before = table.clone();
        let _ = apply(&table, &[0, 1, 2], ErrorClass::Major).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_repeated_apply_is_idempotent() {
        let table = three_row_table();
        let (first, _) = apply(&table, &[0, 2], ErrorClass::Minor).unwrap();
        let (second, _) = apply(&table, &[0, 2], ErrorClass::Minor).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_message_format() {
        let summary = ApplySummary {
            error_class: ErrorClass::Major,
            count: 1,
        };
        assert_eq!(summary.message(), "Applied Major Error to 1 row(s).");
    }
}

use thiserror::Error;

/// Errors raised by table loading, annotation, and export.
///
/// Each variant is terminal for the single operation that raised it;
/// callers report it inline and keep prior state.
#[derive(Debug, Error)]
pub enum Error {
    /// The uploaded bytes are not a readable workbook, or a sheet
    /// could not be parsed into a table.
    #[error("could not read workbook: {0}")]
    Input(#[from] calamine::XlsxError),

    /// The requested sheet does not exist in the workbook.
    #[error("sheet {0:?} not found in workbook")]
    SheetNotFound(String),

    /// A selected row index is out of bounds for the current table.
    /// This only happens when a selection outlives the table it was
    /// made against, so it is reported rather than clamped.
    #[error("row {index} is out of range for a table of {rows} row(s)")]
    SelectionRange { index: usize, rows: usize },

    /// The derived table could not be encoded as a workbook.
    #[error("could not write workbook: {0}")]
    Serialization(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, Error>;

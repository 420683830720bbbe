//! Redline Core - Platform-agnostic spreadsheet review library
//!
//! This crate provides the data structures and logic for the Redline
//! error-marking tool: a reviewer opens a workbook sheet as a table,
//! marks rows that contain a classified error, overwrites the marked
//! rows with a sentinel value, and exports the result as a new
//! workbook. It's designed to work both in native CLI and WASM
//! environments.

pub mod app;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod selection;
pub mod source;

pub use app::{ActiveSheet, App, Mode, WorkbookFile};
pub use engine::{apply, ApplySummary};
pub use error::{Error, Result};
pub use export::{suggested_name, write_workbook, ExportArtifact, EXPORT_SHEET_NAME, XLSX_MIME};
pub use model::{CellValue, ErrorClass, Table, SENTINEL};
pub use selection::{SelectionStore, SheetKey};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::{self, ApplySummary};
use crate::error::Result;
use crate::export::{self, ExportArtifact};
use crate::model::{ErrorClass, Table};
use crate::selection::{SelectionStore, SheetKey};
use crate::source;

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FilePicker,
    SheetPicker,
    ClassPicker,
    Input,
    Help,
}

/// A workbook uploaded into the session.
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub sheets: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

/// The (file, sheet) pair currently on screen, with its parsed table.
/// Rebuilt from the raw bytes on every activation; the table is never
/// mutated in place.
#[derive(Debug, Clone)]
pub struct ActiveSheet {
    pub file_index: usize,
    pub sheet: String,
    pub table: Table,
}

/// Platform-agnostic session state, driven identically by the CLI and
/// web frontends.
pub struct App {
    ref_number: String,
    pub files: Vec<WorkbookFile>,
    pub active: Option<ActiveSheet>,
    pub selection: SelectionStore,
    pub error_class: ErrorClass,
    pub derived: Option<(Table, ApplySummary)>,
    pub mode: Mode,
    pub running: bool,

    // Row cursor within the active table
    pub cursor_row: usize,

    // Picker state
    pub file_selected: usize,
    pub sheet_selected: usize,
    pub class_selected: usize,

    // Input state (file path entry)
    pub input_buffer: String,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        // Short opaque token shown in the sidebar, fixed for the session.
        let ref_number = Uuid::new_v4().to_string()[..8].to_string();

        Self {
            ref_number,
            files: Vec::new(),
            active: None,
            selection: SelectionStore::new(),
            error_class: ErrorClass::default(),
            derived: None,
            mode: Mode::Normal,
            running: true,

            cursor_row: 0,

            file_selected: 0,
            sheet_selected: 0,
            class_selected: 0,

            input_buffer: String::new(),

            status_message: None,
        }
    }

    /// Session reference number, generated once and never mutated.
    pub fn ref_number(&self) -> &str {
        &self.ref_number
    }

    /// Register an uploaded workbook. The first upload opens its first
    /// sheet automatically.
    pub fn add_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        let name = name.into();
        let sheets = source::sheet_names(&bytes)?;
        self.files.push(WorkbookFile {
            name,
            bytes,
            sheets,
            loaded_at: Utc::now(),
        });

        if self.active.is_none() {
            let index = self.files.len() - 1;
            if let Some(sheet) = self.files[index].sheets.first().cloned() {
                self.open_sheet(index, &sheet)?;
            }
        }
        Ok(())
    }

    /// Activate a (file, sheet) pair: parse a fresh table, retarget the
    /// selection store (hard reset on pair change), and drop any
    /// previously derived table. On failure the prior state is kept.
    pub fn open_sheet(&mut self, file_index: usize, sheet: &str) -> Result<()> {
        let file = match self.files.get(file_index) {
            Some(f) => f,
            None => return Ok(()),
        };

        let table = source::read_table(&file.bytes, sheet)?;
        self.selection.retarget(SheetKey::new(file_index, sheet));
        self.active = Some(ActiveSheet {
            file_index,
            sheet: sheet.to_string(),
            table,
        });
        self.derived = None;
        self.cursor_row = 0;
        Ok(())
    }

    pub fn active_table(&self) -> Option<&Table> {
        self.active.as_ref().map(|a| &a.table)
    }

    pub fn active_file(&self) -> Option<&WorkbookFile> {
        self.active
            .as_ref()
            .and_then(|a| self.files.get(a.file_index))
    }

    /// Title for display: "file | sheet"
    pub fn title(&self) -> String {
        match (&self.active, self.active_file()) {
            (Some(active), Some(file)) => format!("{} | {}", file.name, active.sheet),
            _ => "No workbook".to_string(),
        }
    }

    // Row cursor movement

    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let rows = self.active_table().map(|t| t.row_count()).unwrap_or(0);
        if self.cursor_row + 1 < rows {
            self.cursor_row += 1;
        }
    }

    pub fn move_to_top(&mut self) {
        self.cursor_row = 0;
    }

    pub fn move_to_bottom(&mut self) {
        let rows = self.active_table().map(|t| t.row_count()).unwrap_or(0);
        self.cursor_row = rows.saturating_sub(1);
    }

    /// Flip the mark on the row under the cursor.
    pub fn toggle_current_row(&mut self) {
        if self.active_table().map(|t| t.is_empty()).unwrap_or(true) {
            return;
        }
        self.selection.toggle(self.cursor_row);
    }

    /// Run the annotation engine over the current selection, storing
    /// the derived table and reporting the summary in the status line.
    /// Selection state is untouched, so the user can re-apply or
    /// adjust rows and apply again.
    pub fn apply_changes(&mut self) -> bool {
        let table = match self.active_table() {
            Some(t) => t,
            None => {
                self.set_status("No sheet open");
                return false;
            }
        };

        match engine::apply(table, &self.selection.current(), self.error_class) {
            Ok((derived, summary)) => {
                let message = summary.message();
                self.derived = Some((derived, summary));
                self.set_status(&message);
                true
            }
            Err(e) => {
                self.set_status(&format!("Apply failed: {}", e));
                false
            }
        }
    }

    /// Serialize the latest derived table for download. `None` until
    /// apply has run for the active sheet.
    pub fn export_artifact(&self) -> Result<Option<ExportArtifact>> {
        // A derived table implies an open sheet, so the source file is
        // always available here.
        let (table, file) = match (&self.derived, self.active_file()) {
            (Some((table, _)), Some(file)) => (table, file),
            _ => return Ok(None),
        };

        Ok(Some(ExportArtifact {
            file_name: export::suggested_name(&file.name),
            bytes: export::write_workbook(table)?,
        }))
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use rust_xlsxwriter::Workbook;

    /// A workbook with two sheets of distinct content.
    fn two_sheet_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();

        let first = workbook.add_worksheet();
        first.set_name("First").unwrap();
        first.write_string(0, 0, "a").unwrap();
        first.write_string(0, 1, "b").unwrap();
        first.write_number(1, 0, 1).unwrap();
        first.write_number(1, 1, 2).unwrap();
        first.write_number(2, 0, 3).unwrap();
        first.write_number(2, 1, 4).unwrap();
        first.write_number(3, 0, 5).unwrap();
        first.write_number(3, 1, 6).unwrap();

        let second = workbook.add_worksheet();
        second.set_name("Second").unwrap();
        second.write_string(0, 0, "only").unwrap();
        second.write_string(1, 0, "row").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    fn app_with_file() -> App {
        let mut app = App::new();
        app.add_file("report.xlsx", two_sheet_workbook()).unwrap();
        app
    }

    #[test]
    fn test_ref_number_is_an_8_char_token() {
        let app = App::new();
        assert_eq!(app.ref_number().len(), 8);
    }

    #[test]
    fn test_first_upload_opens_first_sheet() {
        let app = app_with_file();
        let active = app.active.as_ref().unwrap();
        assert_eq!(active.sheet, "First");
        assert_eq!(active.table.row_count(), 3);
    }

    #[test]
    fn test_sheet_switch_resets_selection() {
        let mut app = app_with_file();
        app.toggle_current_row();
        app.move_down();
        app.toggle_current_row();
        assert_eq!(app.selection.len(), 2);

        app.open_sheet(0, "Second").unwrap();
        assert!(app.selection.is_empty());
        assert_eq!(app.cursor_row, 0);
    }

    #[test]
    fn test_file_switch_resets_selection() {
        let mut app = app_with_file();
        app.toggle_current_row();
        assert_eq!(app.selection.len(), 1);

        app.add_file("other.xlsx", two_sheet_workbook()).unwrap();
        app.open_sheet(1, "First").unwrap();
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_switch_between_same_named_files_resets_selection() {
        let mut app = App::new();
        app.add_file("report.xlsx", two_sheet_workbook()).unwrap();
        app.move_down();
        app.move_down();
        app.toggle_current_row();
        assert_eq!(app.selection.current(), vec![2]);

        // Same display name, different upload: still a different file.
        app.add_file("report.xlsx", two_sheet_workbook()).unwrap();
        app.open_sheet(1, "First").unwrap();
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_failed_open_keeps_prior_state() {
        let mut app = app_with_file();
        app.toggle_current_row();

        assert!(app.open_sheet(0, "Missing").is_err());
        assert_eq!(app.active.as_ref().unwrap().sheet, "First");
        assert_eq!(app.selection.len(), 1);
    }

    #[test]
    fn test_apply_stores_derived_table_and_summary() {
        let mut app = app_with_file();
        app.move_down();
        app.toggle_current_row();
        app.error_class = ErrorClass::Major;

        assert!(app.apply_changes());
        let (derived, summary) = app.derived.as_ref().unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(
            derived.row(1).unwrap(),
            &[CellValue::sentinel(), CellValue::sentinel()]
        );
        assert_eq!(derived.row(0), app.active_table().unwrap().row(0));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Applied Major Error to 1 row(s).")
        );
    }

    #[test]
    fn test_export_requires_apply_first() {
        let mut app = app_with_file();
        assert!(app.export_artifact().unwrap().is_none());

        app.toggle_current_row();
        app.apply_changes();
        let artifact = app.export_artifact().unwrap().unwrap();
        assert_eq!(artifact.file_name, "updated_report.xlsx");
        assert!(!artifact.bytes.is_empty());
    }

    #[test]
    fn test_exported_bytes_hold_the_derived_rows() {
        let mut app = app_with_file();
        app.toggle_current_row();
        app.apply_changes();

        let artifact = app.export_artifact().unwrap().unwrap();
        let read_back =
            crate::source::read_table(&artifact.bytes, crate::export::EXPORT_SHEET_NAME).unwrap();
        assert_eq!(read_back.columns(), &["a", "b"]);
        assert_eq!(read_back.row_count(), 3);
        assert_eq!(
            read_back.row(0).unwrap(),
            &[CellValue::sentinel(), CellValue::sentinel()]
        );
        assert_eq!(
            read_back.row(1).unwrap(),
            &[CellValue::Number(3.0), CellValue::Number(4.0)]
        );
    }

    #[test]
    fn test_toggle_on_empty_session_is_a_no_op() {
        let mut app = App::new();
        app.toggle_current_row();
        assert!(app.selection.is_empty());
    }
}

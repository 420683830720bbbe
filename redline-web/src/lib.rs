//! Redline Web - WebAssembly version of the spreadsheet review tool
//!
//! This crate provides a browser-based version of Redline using
//! Ratzilla for terminal rendering in the DOM. Workbooks come in
//! through a file input on the page and exports go out as Blob
//! downloads with the xlsx MIME type.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{event::KeyCode, DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use redline_core::{App, ErrorClass, Mode};

pub mod io;
mod ui;

/// Initialize the Redline web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let mut app = App::new();
    app.set_status("Upload one or more .xlsx files to get started. '?' for help");

    // Wrap in Rc<RefCell> for shared state
    let app_state = Rc::new(RefCell::new(app));

    // Uploads come from the page's file input
    io::attach_file_input(app_state.clone())?;

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let mut app = app_state_cloned.borrow_mut();
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(&mut app, event.code),
                Mode::FilePicker => handle_file_picker(&mut app, event.code),
                Mode::SheetPicker => handle_sheet_picker(&mut app, event.code),
                Mode::ClassPicker => handle_class_picker(&mut app, event.code),
                // File paths come from the upload input in the browser
                Mode::Input => app.mode = Mode::Normal,
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    });

    // Draw loop
    terminal.draw_web(move |frame| {
        let app = app_state.borrow();
        ui::draw(frame, &app);
    });

    web_sys::console::log_1(&"Redline WASM initialized".into());

    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.move_to_top(),
        KeyCode::Char('G') => app.move_to_bottom(),

        // Mark the row under the cursor
        KeyCode::Char(' ') => app.toggle_current_row(),

        // Pickers
        KeyCode::Char('f') => {
            if !app.files.is_empty() {
                app.file_selected = app.active.as_ref().map(|a| a.file_index).unwrap_or(0);
                app.mode = Mode::FilePicker;
            }
        }
        KeyCode::Char('s') => {
            if app.active.is_some() {
                app.sheet_selected = 0;
                app.mode = Mode::SheetPicker;
            }
        }
        KeyCode::Char('c') => {
            app.class_selected = ErrorClass::all()
                .iter()
                .position(|c| *c == app.error_class)
                .unwrap_or(0);
            app.mode = Mode::ClassPicker;
        }

        // Apply the sentinel mutation to marked rows
        KeyCode::Char('a') => {
            app.apply_changes();
        }

        // Export as a browser download
        KeyCode::Char('e') => match app.export_artifact() {
            Ok(Some(artifact)) => {
                if let Err(e) = io::download_workbook(&artifact) {
                    app.set_status(&format!("Export failed: {:?}", e));
                } else {
                    app.set_status(&format!("Downloading {}", artifact.file_name));
                }
            }
            Ok(None) => app.set_status("Nothing to export. Apply changes first with 'a'."),
            Err(e) => app.set_status(&format!("Export failed: {}", e)),
        },

        _ => {}
    }
}

fn handle_file_picker(app: &mut App, code: KeyCode) {
    let total = app.files.len().max(1);

    match code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            app.file_selected = (app.file_selected + 1) % total;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.file_selected = if app.file_selected == 0 {
                total - 1
            } else {
                app.file_selected - 1
            };
        }
        KeyCode::Enter => {
            let index = app.file_selected;
            let sheet = app
                .files
                .get(index)
                .and_then(|f| f.sheets.first().cloned());
            if let Some(sheet) = sheet {
                match app.open_sheet(index, &sheet) {
                    Ok(()) => app.set_status(&format!("Opened {}", app.title())),
                    Err(e) => app.set_status(&format!("Error: {}", e)),
                }
            }
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn handle_sheet_picker(app: &mut App, code: KeyCode) {
    let total = app
        .active_file()
        .map(|f| f.sheets.len())
        .unwrap_or(0)
        .max(1);

    match code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            app.sheet_selected = (app.sheet_selected + 1) % total;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sheet_selected = if app.sheet_selected == 0 {
                total - 1
            } else {
                app.sheet_selected - 1
            };
        }
        KeyCode::Enter => {
            let target = app.active.as_ref().map(|a| a.file_index).zip(
                app.active_file()
                    .and_then(|f| f.sheets.get(app.sheet_selected).cloned()),
            );
            if let Some((index, sheet)) = target {
                match app.open_sheet(index, &sheet) {
                    Ok(()) => app.set_status(&format!("Opened {}", app.title())),
                    Err(e) => app.set_status(&format!("Error: {}", e)),
                }
            }
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn handle_class_picker(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            app.class_selected = (app.class_selected + 1) % ErrorClass::all().len();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let len = ErrorClass::all().len();
            app.class_selected = if app.class_selected == 0 {
                len - 1
            } else {
                app.class_selected - 1
            };
        }
        KeyCode::Enter => {
            app.error_class = ErrorClass::all()[app.class_selected];
            app.mode = Mode::Normal;
        }
        // Quick select
        KeyCode::Char('1') => {
            app.error_class = ErrorClass::Major;
            app.mode = Mode::Normal;
        }
        KeyCode::Char('2') => {
            app.error_class = ErrorClass::Minor;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

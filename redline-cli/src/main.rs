//! Redline CLI - Terminal-based spreadsheet error-marking tool

mod io;
mod ui;

use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use redline_core::{App, ErrorClass, Mode};

fn main() -> Result<()> {
    // Workbook paths from args
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new();

    // Load workbooks if provided
    for path in &args {
        match io::load_file(path) {
            Ok((name, bytes)) => match app.add_file(name, bytes) {
                Ok(()) => app.set_status(&format!("Loaded {}", path)),
                Err(e) => app.set_status(&format!("Error: {}", e)),
            },
            Err(e) => app.set_status(&format!("Error: {}", e)),
        }
    }
    if args.is_empty() {
        app.set_status("No workbook loaded. Pass .xlsx paths as arguments or press 'o'.");
    }

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Clear status on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, key.code, key.modifiers),
                Mode::FilePicker => handle_file_picker(app, key.code),
                Mode::SheetPicker => handle_sheet_picker(app, key.code),
                Mode::ClassPicker => handle_class_picker(app, key.code),
                Mode::Input => handle_input_mode(app, key.code),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode, _modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('q') => app.running = false,
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

        // Export
        KeyCode::Char('e') => match app.export_artifact() {
            Ok(Some(artifact)) => match io::save_artifact(&artifact) {
                Ok(path) => app.set_status(&format!("Exported to {}", path.display())),
                Err(e) => app.set_status(&format!("Export failed: {}", e)),
            },
            Ok(None) => app.set_status("Nothing to export. Apply changes first with 'a'."),
            Err(e) => app.set_status(&format!("Export failed: {}", e)),
        },

        // Open file
        KeyCode::Char('o') => {
            app.input_buffer.clear();
            app.mode = Mode::Input;
        }

        _ => {}
    }
}

fn handle_file_picker(app: &mut App, code: KeyCode) {
    let total = app.files.len();

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

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Enter => {
            let path = app.input_buffer.clone();
            match io::load_file(&path) {
                Ok((name, bytes)) => match app.add_file(name, bytes) {
                    Ok(()) => app.set_status(&format!("Loaded {}", path)),
                    Err(e) => app.set_status(&format!("Error: {}", e)),
                },
                Err(e) => app.set_status(&format!("Error: {}", e)),
            }
            app.input_buffer.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

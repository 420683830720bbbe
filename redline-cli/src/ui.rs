//! Terminal UI rendering for the Redline CLI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use redline_core::{App, ErrorClass, Mode};

// GitHub dark palette
const SURFACE0: Color = Color::Rgb(22, 27, 34);
const SURFACE1: Color = Color::Rgb(48, 54, 61);
const TEXT: Color = Color::Rgb(230, 237, 243);
const SUBTEXT: Color = Color::Rgb(139, 148, 158);
const RED: Color = Color::Rgb(248, 81, 73);
const YELLOW: Color = Color::Rgb(210, 153, 34);
const GREEN: Color = Color::Rgb(63, 185, 80);
const BLUE: Color = Color::Rgb(88, 166, 255);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_main_area(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Draw popups/overlays
    match app.mode {
        Mode::FilePicker => draw_file_picker(frame, app),
        Mode::SheetPicker => draw_sheet_picker(frame, app),
        Mode::ClassPicker => draw_class_picker(frame, app),
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let marked = app.selection.len();
    let rows = app
        .active_table()
        .map(|t| t.row_count())
        .unwrap_or(0);

    let title_text = format!(
        " Redline - {} [{} of {} row(s) marked] ref {}",
        app.title(),
        marked,
        rows,
        app.ref_number(),
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Row list
            Constraint::Length(34), // Sidebar
        ])
        .split(area);

    draw_row_list(frame, app, chunks[0]);
    draw_sidebar(frame, app, chunks[1]);
}

fn draw_row_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Rows");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let table = match app.active_table() {
        Some(t) => t,
        None => {
            let hint = Paragraph::new("Upload an .xlsx workbook to get started ('o').")
                .style(Style::default().fg(SUBTEXT))
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
            return;
        }
    };

    // Keep the cursor row in view
    let visible = inner.height as usize;
    let first = app.cursor_row.saturating_sub(visible.saturating_sub(1));

    let items: Vec<ListItem> = (first..table.row_count())
        .take(visible)
        .map(|i| {
            let mark = if app.selection.is_marked(i) { "[x]" } else { "[ ]" };
            let mark_style = if app.selection.is_marked(i) {
                Style::default().fg(RED)
            } else {
                Style::default().fg(SUBTEXT)
            };
            let row_style = if i == app.cursor_row {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), mark_style),
                Span::styled(format!("{:>4}  ", i), Style::default().fg(SUBTEXT)),
                Span::styled(table.row_preview(i), row_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT))
        .title("Session");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Error class: ", Style::default().fg(SUBTEXT)),
        Span::styled(
            app.error_class.as_str(),
            Style::default().fg(class_color(app.error_class)),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("Files ({})", app.files.len()),
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
    )));
    for (i, file) in app.files.iter().enumerate() {
        let active = app.active.as_ref().map(|a| a.file_index) == Some(i);
        let marker = if active { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{} ({} sheet(s))", marker, file.name, file.sheets.len()),
            if active {
                Style::default().fg(BLUE)
            } else {
                Style::default().fg(SUBTEXT)
            },
        )));
        lines.push(Line::from(Span::styled(
            format!("    loaded {}", file.loaded_at.format("%H:%M:%S")),
            Style::default().fg(SUBTEXT),
        )));
    }

    lines.push(Line::from(""));
    match &app.derived {
        Some((_, summary)) => {
            lines.push(Line::from(Span::styled(
                summary.message(),
                Style::default().fg(GREEN),
            )));
            lines.push(Line::from(Span::styled(
                "'e' to export",
                Style::default().fg(SUBTEXT),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No changes applied",
                Style::default().fg(SUBTEXT),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status_message {
        Some(msg) => msg.clone(),
        None => " space: mark  a: apply  e: export  c: class  f/s: file/sheet  ?: help  q: quit"
            .to_string(),
    };

    let status = Paragraph::new(text).style(Style::default().fg(SUBTEXT).bg(SURFACE0));
    frame.render_widget(status, area);
}

fn class_color(class: ErrorClass) -> Color {
    match class {
        ErrorClass::Major => RED,
        ErrorClass::Minor => YELLOW,
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_picker(frame: &mut Frame, title: &str, items: Vec<ListItem>, height: u16) {
    let area = centered_rect(44, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(List::new(items), inner);
}

fn draw_file_picker(frame: &mut Frame, app: &App) {
    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let style = if i == app.file_selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(SUBTEXT)
            };
            ListItem::new(Span::styled(file.name.clone(), style))
        })
        .collect();

    let height = (app.files.len() as u16).saturating_add(2).min(14);
    draw_picker(frame, "Select File", items, height);
}

fn draw_sheet_picker(frame: &mut Frame, app: &App) {
    let sheets: Vec<String> = app
        .active_file()
        .map(|f| f.sheets.clone())
        .unwrap_or_default();

    let items: Vec<ListItem> = sheets
        .iter()
        .enumerate()
        .map(|(i, sheet)| {
            let style = if i == app.sheet_selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(SUBTEXT)
            };
            ListItem::new(Span::styled(sheet.clone(), style))
        })
        .collect();

    let height = (sheets.len() as u16).saturating_add(2).min(14);
    draw_picker(frame, "Select Sheet", items, height);
}

fn draw_class_picker(frame: &mut Frame, app: &App) {
    let items: Vec<ListItem> = ErrorClass::all()
        .iter()
        .enumerate()
        .map(|(i, class)| {
            let style = if i == app.class_selected {
                Style::default().fg(class_color(*class)).bg(SURFACE1)
            } else {
                Style::default().fg(class_color(*class))
            };
            ListItem::new(Span::styled(
                format!("{}. {}", i + 1, class.as_str()),
                style,
            ))
        })
        .collect();

    draw_picker(frame, "Select Error Type", items, 4);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Open workbook (path)");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(app.input_buffer.as_str()).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(52, 16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from("j/k      move between rows"),
        Line::from("g/G      first/last row"),
        Line::from("space    mark/unmark row as erroneous"),
        Line::from("c        choose error class (Major/Minor)"),
        Line::from("a        apply: overwrite marked rows with X"),
        Line::from("e        export updated workbook"),
        Line::from("f        switch file"),
        Line::from("s        switch sheet"),
        Line::from("o        open workbook by path"),
        Line::from("q        quit"),
        Line::from(""),
        Line::from("Switching file or sheet clears all marks."),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(TEXT)),
        inner,
    );
}

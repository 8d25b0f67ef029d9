use super::theme::Palette;
use crate::application::{App, AppMode, FormField};
use crate::domain::HEADER;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

const TITLE_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 3;
const FORM_WIDTH: u16 = 34;

/// Number of table rows visible for a terminal of the given height.
///
/// Accounts for the title line, the status bar, the table borders, the
/// header row and its bottom margin.
pub fn table_viewport_rows(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(TITLE_HEIGHT + STATUS_HEIGHT + 2 + 2) as usize
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);
    let base = Style::default().bg(palette.background).fg(palette.foreground);
    f.render_widget(Block::default().style(base), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_title(f, app, &palette, chunks[0]);
    render_form(f, app, &palette, body[0]);
    render_table(f, app, &palette, body[1]);
    render_status_bar(f, app, &palette, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll, &palette);
    }
}

fn render_title(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title = Paragraph::new(format!(
        "Productivity Tracker | {} | theme: {}",
        app.store().location(),
        app.theme
    ))
    .style(Style::default().fg(palette.header).add_modifier(Modifier::BOLD));
    f.render_widget(title, area);
}

fn field_block<'a>(title: &'a str, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused { palette.focus_border } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

fn render_form(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Insert Row")
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let focus = app.form.focus();
    let in_form = app.mode == AppMode::Form;

    for (field, title, area) in [
        (FormField::Date, "Date", rows[0]),
        (FormField::Task, "Task", rows[1]),
        (FormField::Hours, "Hours Spent (↑/↓)", rows[2]),
    ] {
        let Some(text_field) = app.form.text_field(field) else {
            continue;
        };
        let text_style = if text_field.is_showing_placeholder() {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.foreground)
        };
        let focused = focus == field;
        let paragraph = Paragraph::new(text_field.display_text())
            .style(text_style)
            .block(field_block(title, focused, palette));
        f.render_widget(paragraph, area);

        if focused && in_form && area.width > 2 {
            let offset = (text_field.cursor() as u16).min(area.width - 3);
            f.set_cursor_position(Position::new(area.x + 1 + offset, area.y + 1));
        }
    }

    let status = Paragraph::new(Line::from(vec![
        Span::styled("◂ ", Style::default().fg(palette.muted)),
        Span::styled(
            app.form.status.as_str(),
            Style::default().fg(palette.status_color(app.form.status)),
        ),
        Span::styled(" ▸", Style::default().fg(palette.muted)),
    ]))
    .block(field_block("Status (←/→)", focus == FormField::Status, palette));
    f.render_widget(status, rows[3]);

    let button_style = if focus == FormField::Insert {
        Style::default()
            .fg(palette.selection_fg)
            .bg(palette.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new("Insert")
        .alignment(Alignment::Center)
        .style(button_style)
        .block(field_block("", focus == FormField::Insert, palette));
    f.render_widget(button, rows[4]);

    let separator = Paragraph::new("─".repeat(rows[5].width as usize))
        .style(Style::default().fg(palette.border));
    f.render_widget(separator, rows[5]);

    let switch_on = app.theme == crate::domain::Theme::Light;
    let switch_style = if focus == FormField::ThemeSwitch {
        Style::default().fg(palette.selection_fg).bg(palette.selection_bg)
    } else {
        Style::default().fg(palette.foreground)
    };
    let switch = Paragraph::new(format!(
        " {} Mode: {}",
        if switch_on { "(○●)" } else { "(●○)" },
        if switch_on { "Light" } else { "Dark" }
    ))
    .style(switch_style);
    f.render_widget(switch, rows[6]);
}

fn render_table(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let visible = (area.height as usize).saturating_sub(4);
    let start = app.table_scroll.min(app.rows.len());
    let end = (start + visible).min(app.rows.len());

    let header = Row::new(HEADER.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(palette.header).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = app.rows[start..end].iter().map(|row| {
        let [date, task, hours, status] = row.cells();
        Row::new(vec![
            Cell::from(date),
            Cell::from(task),
            Cell::from(hours),
            Cell::from(status).style(Style::default().fg(palette.status_color(row.status))),
        ])
    });

    let summary = app.summary();
    let title = if app.rows.len() > visible && visible > 0 {
        format!(
            "Log ({} rows, {} hours) [{}-{}]",
            summary.rows,
            summary.total_hours,
            start + 1,
            end
        )
    } else {
        format!("Log ({} rows, {} hours)", summary.rows, summary.total_hours)
    };

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(11),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(palette.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (text, style) = match app.mode {
        AppMode::Form => match &app.notice {
            Some(notice) => {
                let color = if notice.is_error() { palette.error } else { palette.accent };
                (notice.text().to_string(), Style::default().fg(color))
            }
            None => (
                "Tab: next field | Ctrl+S: insert | Ctrl+T: theme | Ctrl+E: export CSV | PgUp/PgDn: scroll | F1: help | Esc: quit"
                    .to_string(),
                Style::default().fg(palette.foreground),
            ),
        },
        AppMode::Help => (
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
            Style::default().fg(palette.header),
        ),
        AppMode::ExportCsv => (
            format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
            Style::default().fg(palette.accent),
        ),
    };

    let status = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Status")
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(status, area);

    if app.mode == AppMode::ExportCsv && area.width > 2 {
        let prefix = "Export CSV as: ".chars().count();
        let offset = ((prefix + app.cursor_position) as u16).min(area.width - 3);
        f.set_cursor_position(Position::new(area.x + 1 + offset, area.y + 1));
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize, palette: &Palette) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(palette.header).bg(palette.background)),
        )
        .style(Style::default().fg(palette.foreground).bg(palette.background));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"PRODUCTIVITY TRACKER

=== LOGGING A TASK ===
Date            Free text, e.g. 2024-01-01
Task            Free text describing the work
Hours Spent     Whole number of hours, at least 1
                ↑/↓ step between 1 and 24, or type a value
Status          Completed, In Progress or Pending
                ←/→ (or ↑/↓) cycle through the choices
Insert          Enter or Space writes the row to the spreadsheet
                and adds it to the table

Placeholders disappear when a field gains focus. A row is only
added to the table after it was written to the file.

=== FORM NAVIGATION ===
Tab / Shift+Tab Next / previous control
Enter           Next control (Insert on the button)
Ctrl+S          Insert from any control

=== TABLE ===
PgUp / PgDn     Scroll one page
Ctrl+Home/End   Jump to first / last row
Mouse wheel     Scroll three rows

=== OTHER ===
Ctrl+T          Toggle dark / light theme (also the Mode switch)
Ctrl+E          Export all rows to a CSV file
F1              Show this help
Esc, Ctrl+Q     Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window"#;

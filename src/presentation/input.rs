use crate::application::{App, AppMode, FormField};
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

const MOUSE_SCROLL_ROWS: usize = 3;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    pub fn handle_mouse_event(app: &mut App, kind: MouseEventKind) {
        if app.mode != AppMode::Form {
            return;
        }
        match kind {
            MouseEventKind::ScrollUp => app.scroll_table_up(MOUSE_SCROLL_ROWS),
            MouseEventKind::ScrollDown => app.scroll_table_down(MOUSE_SCROLL_ROWS),
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    app.quit();
                    return;
                }
                KeyCode::Char('t') => {
                    app.toggle_theme();
                    return;
                }
                KeyCode::Char('e') => {
                    app.start_csv_export();
                    return;
                }
                KeyCode::Char('s') => {
                    app.submit();
                    return;
                }
                KeyCode::Home => {
                    app.scroll_table_to_top();
                    return;
                }
                KeyCode::End => {
                    app.scroll_table_to_bottom();
                    return;
                }
                _ => return,
            }
        }

        // Any other key dismisses the last message
        app.notice = None;

        match key {
            KeyCode::Esc => app.quit(),
            KeyCode::F(1) => app.show_help(),
            KeyCode::Tab => app.form.focus_next(),
            KeyCode::BackTab => app.form.focus_previous(),
            KeyCode::PageUp => app.scroll_table_up(app.viewport_rows),
            KeyCode::PageDown => app.scroll_table_down(app.viewport_rows),
            _ => match app.form.focus() {
                FormField::Date | FormField::Task => Self::handle_text_field(app, key),
                FormField::Hours => Self::handle_hours_field(app, key),
                FormField::Status => Self::handle_status_field(app, key),
                FormField::Insert => Self::handle_insert_button(app, key),
                FormField::ThemeSwitch => Self::handle_theme_switch(app, key),
            },
        }
    }

    fn handle_text_field(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Down => app.form.focus_next(),
            KeyCode::Up => app.form.focus_previous(),
            _ => Self::edit_focused_text(app, key),
        }
    }

    fn handle_hours_field(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.form.focus_next(),
            KeyCode::Up => app.form.step_hours(1),
            KeyCode::Down => app.form.step_hours(-1),
            _ => Self::edit_focused_text(app, key),
        }
    }

    fn edit_focused_text(app: &mut App, key: KeyCode) {
        let Some(field) = app.form.focused_text_mut() else {
            return;
        };
        match key {
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            KeyCode::Char(c) => field.insert_char(c),
            _ => {}
        }
    }

    fn handle_status_field(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('h') => {
                app.form.previous_status()
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('l') => {
                app.form.next_status()
            }
            KeyCode::Char(' ') => app.form.next_status(),
            KeyCode::Enter => app.form.focus_next(),
            _ => {}
        }
    }

    fn handle_insert_button(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.submit();
            }
            KeyCode::Up => app.form.focus_previous(),
            KeyCode::Down => app.form.focus_next(),
            _ => {}
        }
    }

    fn handle_theme_switch(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_theme(),
            KeyCode::Up => app.form.focus_previous(),
            KeyCode::Down => app.form.focus_next(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        let byte_index = |input: &str, chars: usize| {
            input
                .char_indices()
                .nth(chars)
                .map(|(i, _)| i)
                .unwrap_or(input.len())
        };

        match key {
            KeyCode::Enter => app.export_csv(),
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let at = byte_index(&app.filename_input, app.cursor_position - 1);
                    app.filename_input.remove(at);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.chars().count() {
                    let at = byte_index(&app.filename_input, app.cursor_position);
                    app.filename_input.remove(at);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.chars().count();
            }
            KeyCode::Char(c) => {
                let at = byte_index(&app.filename_input, app.cursor_position);
                app.filename_input.insert(at, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogRow, Status, Theme};
    use crate::infrastructure::MemoryStore;

    fn app() -> App {
        App::bootstrap(Box::new(MemoryStore::new()), Theme::Dark).unwrap()
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keyboard_submission() {
        let mut app = app();

        type_text(&mut app, "2024-01-01");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Write report");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus(), FormField::Insert);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.rows, vec![LogRow::new("2024-01-01", "Write report", 3, Status::InProgress)]);
        assert_eq!(app.form.focus(), FormField::Date);
        assert!(app.form.date.is_showing_placeholder());
    }

    #[test]
    fn test_typed_non_integer_hours_rejected() {
        let mut app = app();
        app.form.set_focus(FormField::Hours);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "abc");
        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(app.rows.is_empty());
        assert!(app.store().read_all_rows().unwrap().is_empty());
        assert!(app.notice.as_ref().is_some_and(|n| n.is_error()));
    }

    #[test]
    fn test_status_picker_ignores_free_text() {
        let mut app = app();
        app.form.set_focus(FormField::Status);
        type_text(&mut app, "Done");
        assert_eq!(app.form.status, Status::Completed);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.status, Status::Pending);
    }

    #[test]
    fn test_theme_toggles() {
        let mut app = app();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.theme, Theme::Light);

        app.form.set_focus(FormField::ThemeSwitch);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.theme, Theme::Dark);
        assert!(app.rows.is_empty());
    }

    #[test]
    fn test_help_mode() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 6);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Form);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = self::app();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        // Plain 'q' is just text
        let mut app = self::app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.form.date.value(), "q");
    }

    #[test]
    fn test_csv_export_filename_input() {
        let mut app = app();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::ExportCsv);
        assert_eq!(app.filename_input, "productivity_log.csv");

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.filename_input, "productivity_log.csvx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filename_input, "productivity_log.csv");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Form);
        assert!(app.filename_input.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_mouse_scroll() {
        let rows = (0..40)
            .map(|i| LogRow::new(i.to_string(), "t", 1, Status::Pending))
            .collect();
        let mut app = App::bootstrap(Box::new(MemoryStore::with_rows(rows)), Theme::Dark).unwrap();
        app.update_viewport_size(10);

        InputHandler::handle_mouse_event(&mut app, MouseEventKind::ScrollDown);
        assert_eq!(app.table_scroll, 3);
        InputHandler::handle_mouse_event(&mut app, MouseEventKind::ScrollUp);
        assert_eq!(app.table_scroll, 0);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.table_scroll, 10);
    }
}

//! The "Insert Row" form: two text entries, an hours spinbox, a status
//! picker, the Insert button and the theme switch.

use crate::domain::Status;

pub const DATE_PLACEHOLDER: &str = "Date (YYYY-MM-DD)";
pub const TASK_PLACEHOLDER: &str = "Task";
pub const DEFAULT_HOURS: &str = "1";
pub const HOURS_MIN: u32 = 1;
pub const HOURS_MAX: u32 = 24;

/// Focusable controls of the form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Task,
    Hours,
    Status,
    Insert,
    ThemeSwitch,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Date,
        FormField::Task,
        FormField::Hours,
        FormField::Status,
        FormField::Insert,
        FormField::ThemeSwitch,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> FormField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> FormField {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether the control accepts typed characters.
    pub fn is_text(&self) -> bool {
        matches!(self, FormField::Date | FormField::Task | FormField::Hours)
    }
}

/// A single-line entry with an optional placeholder.
///
/// The placeholder is shown until the entry gains focus; an entry left
/// empty shows it again once focus moves on. The cursor is a character
/// index, so multi-byte input edits cleanly.
#[derive(Debug, Clone)]
pub struct TextField {
    value: String,
    placeholder: &'static str,
    showing_placeholder: bool,
    cursor: usize,
}

impl TextField {
    pub fn with_placeholder(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            placeholder,
            showing_placeholder: !placeholder.is_empty(),
            cursor: 0,
        }
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            placeholder: "",
            showing_placeholder: false,
            cursor: value.chars().count(),
        }
    }

    /// The value that gets submitted. A field still showing its placeholder
    /// submits an empty string.
    pub fn value(&self) -> &str {
        if self.showing_placeholder { "" } else { &self.value }
    }

    /// Text to draw: the placeholder or the typed value.
    pub fn display_text(&self) -> &str {
        if self.showing_placeholder { self.placeholder } else { &self.value }
    }

    pub fn is_showing_placeholder(&self) -> bool {
        self.showing_placeholder
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.showing_placeholder = false;
        self.cursor = self.value.chars().count();
    }

    pub fn focus_in(&mut self) {
        if self.showing_placeholder {
            self.showing_placeholder = false;
            self.value.clear();
        }
        self.cursor = self.value.chars().count();
    }

    pub fn focus_out(&mut self) {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            self.showing_placeholder = true;
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.showing_placeholder {
            self.focus_in();
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.showing_placeholder || self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.showing_placeholder || self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// Current contents and focus of the form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub date: TextField,
    pub task: TextField,
    pub hours: TextField,
    pub status: Status,
    focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            date: TextField::with_placeholder(DATE_PLACEHOLDER),
            task: TextField::with_placeholder(TASK_PLACEHOLDER),
            hours: TextField::with_value(DEFAULT_HOURS),
            status: Status::default(),
            focus: FormField::Date,
        }
    }
}

impl FormState {
    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        if let Some(current) = self.text_field_mut(self.focus) {
            current.focus_out();
        }
        self.focus = field;
        if let Some(next) = self.text_field_mut(field) {
            next.focus_in();
        }
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    /// The entry that currently has focus, if it is a text entry.
    pub fn focused_text_mut(&mut self) -> Option<&mut TextField> {
        self.text_field_mut(self.focus)
    }

    pub fn text_field(&self, field: FormField) -> Option<&TextField> {
        match field {
            FormField::Date => Some(&self.date),
            FormField::Task => Some(&self.task),
            FormField::Hours => Some(&self.hours),
            _ => None,
        }
    }

    fn text_field_mut(&mut self, field: FormField) -> Option<&mut TextField> {
        match field {
            FormField::Date => Some(&mut self.date),
            FormField::Task => Some(&mut self.task),
            FormField::Hours => Some(&mut self.hours),
            _ => None,
        }
    }

    /// Spinbox step. Unparseable text snaps back to the minimum.
    pub fn step_hours(&mut self, delta: i64) {
        let current = self.hours.value().trim().parse::<i64>().ok();
        let next = match current {
            Some(h) => h.saturating_add(delta).clamp(i64::from(HOURS_MIN), i64::from(HOURS_MAX)),
            None => i64::from(HOURS_MIN),
        };
        self.hours.set_value(&next.to_string());
    }

    pub fn next_status(&mut self) {
        self.status = self.status.next();
    }

    pub fn previous_status(&mut self) {
        self.status = self.status.previous();
    }

    /// Raw values as they would be submitted: (date, task, hours, status).
    pub fn values(&self) -> (&str, &str, &str, Status) {
        (self.date.value(), self.task.value(), self.hours.value(), self.status)
    }

    /// Back to placeholders and defaults, focus on the first entry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

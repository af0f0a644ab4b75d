//! Input collection for the business form.
//!
//! The collector owns the four text fields, the focused field and the
//! cursor inside it. Cursor positions are counted in characters so that
//! non-ASCII input ("café") edits correctly.

use crate::domain::{BusinessInput, FormField};

/// Owns the four form fields and produces submission snapshots.
///
/// # Examples
///
/// ```
/// use growth_planner::application::InputCollector;
/// use growth_planner::domain::FormField;
///
/// let mut form = InputCollector::default();
/// assert!(!form.is_submittable());
/// form.set_field(FormField::Name, "Cafe");
/// form.set_field(FormField::Category, "Food");
/// form.set_field(FormField::Location, "SF");
/// form.set_field(FormField::Details, "Small");
/// assert!(form.is_submittable());
/// ```
#[derive(Debug, Clone)]
pub struct InputCollector {
    values: BusinessInput,
    /// Field receiving keyboard input
    pub focus: FormField,
    /// Cursor position within the focused field, in characters
    pub cursor_position: usize,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self {
            values: BusinessInput::default(),
            focus: FormField::Name,
            cursor_position: 0,
        }
    }
}

impl InputCollector {
    pub fn value(&self, field: FormField) -> &str {
        self.values.get(field)
    }

    /// Replaces one field's value, leaving the others untouched.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
        if field == self.focus {
            self.cursor_position = self.focused_len();
        }
    }

    /// True when all four fields are non-empty.
    ///
    /// Whitespace-only values count as non-empty.
    pub fn is_submittable(&self) -> bool {
        FormField::ALL
            .iter()
            .all(|field| !self.values.get(*field).is_empty())
    }

    /// An independent copy of the current values.
    pub fn snapshot(&self) -> BusinessInput {
        self.values.clone()
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.focus = field;
        self.cursor_position = self.focused_len();
    }

    pub fn focus_next(&mut self) {
        self.focus_field(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.focus_field(self.focus.previous());
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.values.get_mut(self.focus).insert(index, c);
        self.cursor_position += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let index = self.byte_index();
        self.values.get_mut(self.focus).remove(index);
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.focused_len() {
            let index = self.byte_index();
            self.values.get_mut(self.focus).remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }

    /// Line and column of the cursor inside the focused field.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before: String = self
            .values
            .get(self.focus)
            .chars()
            .take(self.cursor_position)
            .collect();
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|tail| tail.chars().count())
            .unwrap_or(0);
        (line, col)
    }

    fn focused_len(&self) -> usize {
        self.values.get(self.focus).chars().count()
    }

    fn byte_index(&self) -> usize {
        let value = self.values.get(self.focus);
        value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }
}

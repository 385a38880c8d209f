//! Single-line text input state with cursor management.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

/// Text input state for one form field.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// Current input text
    input: String,
    /// Cursor position in the input
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.input
    }

    /// Check if input is empty
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Insert a character at cursor position
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.input.len() {
            self.cursor += 1;
        }
    }

    /// Replace the value with a reformatted rendition of itself and park the
    /// cursor at the end. Masked fields (date, phone) call this after every
    /// edit so separators stay consistent with the digit count.
    pub fn apply_format(&mut self, format: impl Fn(&str) -> String) {
        self.input = format(&self.input);
        self.cursor = self.input.len();
    }

    /// Render the text at the given area, with a cursor cell when focused.
    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style, focused: bool) {
        let text = Paragraph::new(self.input.as_str()).style(style);
        text.render(area, buf);

        if focused && area.width > 0 {
            let cursor_x = area.x + (self.cursor as u16).min(area.width.saturating_sub(1));
            if cursor_x < area.x + area.width {
                buf[(cursor_x, area.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

impl std::fmt::Display for TextInputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.input)
    }
}

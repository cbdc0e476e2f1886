use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::api::TaskStatus;
use crate::shared::theme::{Icons, Theme};

/// Editable single-line input state.
///
/// The cursor is tracked as a grapheme index so that multi-byte and combined
/// characters behave as single units when moving and deleting.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    value: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position as a grapheme index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`, or the end of the string.
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    /// Remove the grapheme before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Remove the grapheme under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    /// Visual width in columns of the text before the cursor
    pub fn prefix_width(&self) -> usize {
        let offset = self.byte_offset(self.cursor);
        self.value[..offset].width()
    }
}

/// Single-line text field with cursor and placeholder
pub struct TextField<'a> {
    state: &'a InputState,
    theme: &'a Theme,
    focused: bool,
    placeholder: &'a str,
}

impl<'a> TextField<'a> {
    pub fn new(state: &'a InputState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            focused: false,
            placeholder: "",
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl<'a> Widget for TextField<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.state.is_empty() && !self.focused {
            render_clipped(self.placeholder, buf, area, self.theme.dimmed_style());
            return;
        }

        // Scroll so the cursor stays inside the visible window.
        let width = area.width as usize;
        let mut skip_cols = 0;
        let prefix = self.state.prefix_width();
        if prefix + 1 > width {
            skip_cols = prefix + 1 - width;
        }

        let text_style = Style::default().fg(self.theme.text_primary);
        let cursor_style = text_style.add_modifier(Modifier::REVERSED);

        let mut col = 0usize;
        let mut x = area.x;
        let mut grapheme_index = 0usize;
        for grapheme in self.state.value().graphemes(true) {
            let w = grapheme.width().max(1);
            if col + w > skip_cols {
                if x + w as u16 > area.x + area.width {
                    break;
                }
                let style = if self.focused && grapheme_index == self.state.cursor() {
                    cursor_style
                } else {
                    text_style
                };
                let cell = buf.get_mut(x, area.y);
                cell.set_symbol(grapheme);
                cell.set_style(style);
                x += w as u16;
            }
            col += w;
            grapheme_index += 1;
        }

        // Cursor past the end of the text renders as a reversed blank.
        if self.focused && self.state.cursor() >= grapheme_index && x < area.x + area.width {
            let cell = buf.get_mut(x, area.y);
            cell.set_symbol(" ");
            cell.set_style(cursor_style);
        }
    }
}

/// Render text clipped to the area width, grapheme by grapheme
fn render_clipped(text: &str, buf: &mut Buffer, area: Rect, style: Style) {
    let mut x = area.x;
    let max_x = area.x + area.width;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width().max(1) as u16;
        if x + w > max_x {
            break;
        }
        let cell = buf.get_mut(x, area.y);
        cell.set_symbol(grapheme);
        cell.set_style(style);
        x += w;
    }
}

/// Icon for a task's status; tasks without one (v1) count as open
pub fn status_icon(status: Option<TaskStatus>) -> &'static str {
    match status {
        Some(TaskStatus::Done) => Icons::DONE,
        _ => Icons::OPEN,
    }
}

/// Spinner frames for the reload indicator
pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

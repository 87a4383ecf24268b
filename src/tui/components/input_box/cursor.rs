//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the internal scroll offset.
//! All methods accept `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use super::text_wrap::{
    BORDER_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Reset cursor to start (used after the buffer is cleared).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }
        let lines = textwrap::wrap(&buffer[..self.pos], wrap_options(width));
        lines.len().saturating_sub(1) as u16
    }

    /// Update scroll offset to keep cursor visible within the viewport.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);

        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Calculate screen position for cursor based on wrapped text layout.
    /// Returns (column, row) in screen coordinates.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let cursor_line = lines.len().saturating_sub(1) as u16;

        // textwrap trims trailing whitespace, so measure the tail of the raw
        // text that belongs to the last wrapped segment instead.
        let chars_in_prev_lines: usize = lines
            .iter()
            .take(lines.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let tail: String = text_before_cursor
            .chars()
            .skip(chars_in_prev_lines)
            .collect();
        let tail = if cursor_line > 0 { tail.trim_start() } else { tail.as_str() };
        let cursor_col = tail.width() as u16;

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + cursor_col,
            area.y + BORDER_OFFSET + visible_line,
        )
    }
}
